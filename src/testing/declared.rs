//! Scenarios declared in YAML files

use async_trait::async_trait;
use std::time::Duration;

use super::assert::assert_equal;
use super::config::{CallStep, ScenarioFile, ScenarioSpec};
use super::scenario::{Scenario, ScenarioContext};
use crate::common::{Error, Result};
use crate::runtime::display_value;

/// A [`ScenarioSpec`] bound to the contract it deploys
#[derive(Debug)]
pub struct DeclaredScenario {
    spec: ScenarioSpec,
    contract: String,
}

impl DeclaredScenario {
    pub fn new(spec: ScenarioSpec, default_contract: &str) -> Self {
        let contract = spec
            .contract
            .clone()
            .unwrap_or_else(|| default_contract.to_string());
        Self { spec, contract }
    }
}

/// Build runnable scenarios from a parsed file
///
/// Contract precedence: scenario, then file, then `fallback_contract`.
pub fn from_file(file: ScenarioFile, fallback_contract: &str) -> Vec<Box<dyn Scenario>> {
    let default = file
        .contract
        .unwrap_or_else(|| fallback_contract.to_string());

    file.scenarios
        .into_iter()
        .map(|spec| Box::new(DeclaredScenario::new(spec, &default)) as Box<dyn Scenario>)
        .collect()
}

async fn execute_call(ctx: &ScenarioContext, step: &CallStep) -> Result<()> {
    let actor = ctx.actor(step.from)?;
    let result = ctx.instance.call(&actor, &step.call, &step.args).await;

    match (result, step.expect_revert) {
        (Ok(_), false) => Ok(()),
        (Err(Error::Revert { .. }), true)
        | (Err(Error::UnknownMethod(_)), true)
        | (Err(Error::InvalidArgument(_)), true) => Ok(()),
        (Ok(value), true) => Err(Error::assertion(
            &format!("{}()", step.call),
            "revert",
            format!("success ({})", display_value(&value)),
        )),
        (Err(e), _) => Err(e),
    }
}

#[async_trait]
impl Scenario for DeclaredScenario {
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn contract(&self) -> &str {
        &self.contract
    }

    fn timeout(&self) -> Option<Duration> {
        self.spec.timeout_secs.map(Duration::from_secs)
    }

    fn has_postcondition(&self) -> bool {
        !self.spec.verify.is_empty()
    }

    async fn execute(&self, ctx: &ScenarioContext) -> Result<()> {
        for step in &self.spec.execute {
            execute_call(ctx, step).await?;
        }
        Ok(())
    }

    async fn verify(&self, ctx: &ScenarioContext) -> Result<()> {
        for step in &self.spec.verify {
            let actor = ctx.actor(step.from)?;
            let actual = ctx.instance.call(&actor, &step.call, &step.args).await?;
            assert_equal(
                &format!("{}()", step.call),
                display_value(&actual),
                display_value(&step.equals),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_precedence() {
        let yaml = r#"
name: suite
contract: FromFile
scenarios:
  - name: a
  - name: b
    contract: FromScenario
"#;
        let scenarios = from_file(ScenarioFile::parse(yaml).unwrap(), "Fallback");
        assert_eq!(scenarios[0].contract(), "FromFile");
        assert_eq!(scenarios[1].contract(), "FromScenario");

        let yaml = "name: suite\nscenarios:\n  - name: a\n";
        let scenarios = from_file(ScenarioFile::parse(yaml).unwrap(), "Fallback");
        assert_eq!(scenarios[0].contract(), "Fallback");
    }

    #[test]
    fn test_postcondition_follows_verify_steps() {
        let yaml = r#"
name: suite
scenarios:
  - name: unverified
    execute:
      - call: createItem
        args: [100]
  - name: verified
    timeout_secs: 3
    verify:
      - call: itemCount
        equals: 0
"#;
        let scenarios = from_file(ScenarioFile::parse(yaml).unwrap(), "ERC721Momento");
        assert!(!scenarios[0].has_postcondition());
        assert!(scenarios[1].has_postcondition());
        assert_eq!(scenarios[1].timeout(), Some(Duration::from_secs(3)));
    }
}
