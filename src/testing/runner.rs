//! Scenario runner implementation
//!
//! Runs scenarios one at a time. Each one gets a fresh proxied deployment
//! and moves through SETUP → EXECUTE → VERIFY under a time limit. A failure
//! is recorded against its scenario and the runner continues with the next.

use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::Colorize;
use serde::Serialize;

use super::scenario::{Scenario, ScenarioContext};
use crate::common::config::{Config, NetworkConfig};
use crate::common::{Error, Result};
use crate::harness::deploy_proxied;
use crate::runtime::{Network, Registry};

/// Note attached to passing scenarios that assert nothing
pub const UNVERIFIED_NOTE: &str = "no postcondition declared";

/// Where a scenario is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioState {
    Init,
    Setup,
    Execute,
    Verify,
    Done,
}

/// Phase a failed scenario stopped in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    Execute,
    Verify,
    Timeout,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::Execute => write!(f, "execute"),
            Self::Verify => write!(f, "verify"),
            Self::Timeout => write!(f, "timeout"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pass,
    Fail,
}

/// Result of one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub contract: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub duration_ms: u64,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }
}

/// Outcomes of one suite, in run order
#[derive(Debug, Clone, Serialize)]
pub struct SuiteReport {
    pub suite: String,
    pub passed: usize,
    pub failed: usize,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl SuiteReport {
    fn new(suite: &str, outcomes: Vec<ScenarioOutcome>) -> Self {
        let passed = outcomes.iter().filter(|o| o.passed()).count();
        Self {
            suite: suite.to_string(),
            passed,
            failed: outcomes.len() - passed,
            outcomes,
        }
    }

    pub fn success(&self) -> bool {
        self.failed == 0
    }
}

/// Reports of every suite in one invocation
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub success: bool,
    pub suites: Vec<SuiteReport>,
}

impl RunReport {
    pub fn new(suites: Vec<SuiteReport>) -> Self {
        Self {
            success: suites.iter().all(SuiteReport::success),
            suites,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Sequential scenario runner
pub struct Runner {
    registry: Registry,
    network: NetworkConfig,
    default_timeout: Duration,
    quiet: bool,
    verbose: bool,
}

impl Runner {
    pub fn new(config: &Config) -> Self {
        Self {
            registry: Registry::builtin(),
            network: config.network.clone(),
            default_timeout: Duration::from_secs(config.timeouts.scenario_secs),
            quiet: false,
            verbose: false,
        }
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Time limit for scenarios that don't set their own
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Suppress human-readable output (for JSON reports)
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run every scenario in order against a fresh network
    pub async fn run_suite(&self, suite: &str, scenarios: &[Box<dyn Scenario>]) -> SuiteReport {
        let network = Arc::new(Network::new(self.registry.clone(), &self.network));

        if !self.quiet {
            println!("\n{} {}", "Running Suite:".blue().bold(), suite.white().bold());
        }
        tracing::info!(suite, scenarios = scenarios.len(), "Suite started");

        let mut outcomes = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            let outcome = self.run_scenario(scenario.as_ref(), &network).await;
            self.print_outcome(&outcome);
            outcomes.push(outcome);
        }

        let report = SuiteReport::new(suite, outcomes);
        tracing::info!(
            suite,
            passed = report.passed,
            failed = report.failed,
            "Suite done"
        );

        if !self.quiet {
            let summary = format!("{} passed, {} failed", report.passed, report.failed);
            if report.success() {
                println!("\n{} {}\n", "✓".green().bold(), summary.green().bold());
            } else {
                println!("\n{} {}\n", "✗".red().bold(), summary.red().bold());
            }
        }

        report
    }

    async fn run_scenario(&self, scenario: &dyn Scenario, network: &Arc<Network>) -> ScenarioOutcome {
        let limit = scenario.timeout().unwrap_or(self.default_timeout);
        let started = Instant::now();
        let mut state = ScenarioState::Init;

        let finished = tokio::time::timeout(limit, drive(scenario, network, &mut state)).await;
        let result = match finished {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err((phase_of(state), e)),
            Err(_) => Err((Phase::Timeout, Error::Timeout(limit))),
        };
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(()) => {
                let message = if scenario.has_postcondition() {
                    None
                } else {
                    tracing::warn!(
                        scenario = scenario.name(),
                        "Scenario passed without verifying any postcondition"
                    );
                    Some(UNVERIFIED_NOTE.to_string())
                };
                tracing::info!(scenario = scenario.name(), duration_ms, "PASS");

                ScenarioOutcome {
                    name: scenario.name().to_string(),
                    contract: scenario.contract().to_string(),
                    status: Status::Pass,
                    phase: None,
                    error_kind: None,
                    message,
                    duration_ms,
                }
            }
            Err((phase, e)) => {
                tracing::info!(
                    scenario = scenario.name(),
                    phase = %phase,
                    error = %e,
                    duration_ms,
                    "FAIL"
                );

                ScenarioOutcome {
                    name: scenario.name().to_string(),
                    contract: scenario.contract().to_string(),
                    status: Status::Fail,
                    phase: Some(phase),
                    error_kind: Some(e.kind()),
                    message: Some(e.to_string()),
                    duration_ms,
                }
            }
        }
    }

    fn print_outcome(&self, outcome: &ScenarioOutcome) {
        if self.quiet {
            return;
        }

        let timing = if self.verbose {
            format!(" ({}ms)", outcome.duration_ms).dimmed().to_string()
        } else {
            String::new()
        };

        match (outcome.status, outcome.phase) {
            (Status::Pass, _) => {
                let note = outcome
                    .message
                    .as_ref()
                    .map(|m| format!(" [{}]", m).yellow().to_string())
                    .unwrap_or_default();
                println!("  {} {}{}{}", "✓".green(), outcome.name, note, timing);
            }
            (Status::Fail, phase) => {
                let phase = phase.map(|p| p.to_string()).unwrap_or_default();
                println!(
                    "  {} {} [{}]{}: {}",
                    "✗".red(),
                    outcome.name,
                    phase.red(),
                    timing,
                    outcome.message.as_deref().unwrap_or_default()
                );
            }
        }
    }
}

/// SETUP → EXECUTE → VERIFY, recording the state reached in `state`
async fn drive(
    scenario: &dyn Scenario,
    network: &Arc<Network>,
    state: &mut ScenarioState,
) -> Result<()> {
    *state = ScenarioState::Setup;
    let instance = deploy_proxied(network, scenario.contract()).await?;
    let ctx = ScenarioContext {
        network: Arc::clone(network),
        instance,
    };
    tracing::debug!(
        scenario = scenario.name(),
        address = %ctx.instance.address(),
        version = %ctx.instance.version(),
        "Setup complete"
    );

    *state = ScenarioState::Execute;
    scenario.execute(&ctx).await?;

    *state = ScenarioState::Verify;
    scenario.verify(&ctx).await?;

    *state = ScenarioState::Done;
    Ok(())
}

fn phase_of(state: ScenarioState) -> Phase {
    match state {
        ScenarioState::Init | ScenarioState::Setup => Phase::Setup,
        ScenarioState::Execute => Phase::Execute,
        ScenarioState::Verify | ScenarioState::Done => Phase::Verify,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::Config;
    use crate::harness::MomentoToken;
    use crate::testing::assert::assert_equal;
    use crate::testing::builtin::momento_suite;
    use crate::testing::config::ScenarioFile;
    use crate::testing::declared::from_file;
    use async_trait::async_trait;

    fn runner() -> Runner {
        Runner::new(&Config::default()).quiet(true)
    }

    /// Sleeps past any reasonable limit during execute
    struct Stall;

    #[async_trait]
    impl Scenario for Stall {
        fn name(&self) -> &str {
            "stall"
        }

        fn contract(&self) -> &str {
            "ERC721Momento"
        }

        fn timeout(&self) -> Option<Duration> {
            Some(Duration::from_millis(50))
        }

        async fn execute(&self, _ctx: &ScenarioContext) -> Result<()> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }

        async fn verify(&self, _ctx: &ScenarioContext) -> Result<()> {
            Ok(())
        }
    }

    /// Mints, then checks it is the only item on its instance
    struct MintAndCount;

    #[async_trait]
    impl Scenario for MintAndCount {
        fn name(&self) -> &str {
            "mint and count"
        }

        fn contract(&self) -> &str {
            "ERC721Momento"
        }

        async fn execute(&self, ctx: &ScenarioContext) -> Result<()> {
            ctx.instance.create_item(&ctx.owner(), 100).await?;
            Ok(())
        }

        async fn verify(&self, ctx: &ScenarioContext) -> Result<()> {
            assert_equal("itemCount()", ctx.instance.item_count().await?, 1)
        }
    }

    fn summary(report: &SuiteReport) -> Vec<(String, Status, Option<Phase>)> {
        report
            .outcomes
            .iter()
            .map(|o| (o.name.clone(), o.status, o.phase))
            .collect()
    }

    #[tokio::test]
    async fn test_builtin_suite_passes() {
        let report = runner()
            .run_suite("ERC721Momento", &momento_suite("ERC721Momento"))
            .await;

        assert!(report.success());
        assert_eq!(report.passed, 2);

        let mint = &report.outcomes[1];
        assert_eq!(mint.name, "mint nft");
        assert_eq!(mint.message.as_deref(), Some(UNVERIFIED_NOTE));
        assert!(report.outcomes[0].message.is_none());
    }

    #[tokio::test]
    async fn test_unknown_contract_fails_setup_only() {
        let mut scenarios = momento_suite("NoSuchContract");
        scenarios.extend(momento_suite("ERC721Momento"));

        let report = runner().run_suite("mixed", &scenarios).await;
        assert_eq!(report.failed, 2);
        assert_eq!(report.passed, 2);

        for outcome in &report.outcomes[..2] {
            assert_eq!(outcome.status, Status::Fail);
            assert_eq!(outcome.phase, Some(Phase::Setup));
            assert_eq!(outcome.error_kind, Some("DEPLOYMENT_ERROR"));
        }
        assert!(report.outcomes[2..].iter().all(ScenarioOutcome::passed));
    }

    /// Implementation whose initializer always rejects
    struct Broken;

    impl crate::runtime::ContractLogic for Broken {
        fn initialize(
            &self,
            _storage: &mut crate::runtime::Storage,
            _ctx: &crate::runtime::CallContext,
        ) -> Result<()> {
            Err(Error::revert("initialize", "owner not set"))
        }

        fn call(
            &self,
            _storage: &mut crate::runtime::Storage,
            _ctx: &crate::runtime::CallContext,
            method: &str,
            _args: &[serde_json::Value],
        ) -> Result<serde_json::Value> {
            Err(Error::UnknownMethod(method.to_string()))
        }

        fn methods(&self) -> &'static [&'static str] {
            &[]
        }
    }

    fn broken() -> Arc<dyn crate::runtime::ContractLogic> {
        Arc::new(Broken)
    }

    #[tokio::test]
    async fn test_failing_initializer_is_deployment_error() {
        let mut registry = Registry::builtin();
        registry.register(crate::runtime::ContractDefinition::new(
            "Broken",
            semver::Version::new(0, 1, 0),
            "always fails to initialize",
            broken,
        ));

        let mut scenarios = momento_suite("Broken");
        scenarios.extend(momento_suite("ERC721Momento"));

        let report = runner().with_registry(registry).run_suite("broken", &scenarios).await;
        let first = &report.outcomes[0];
        assert_eq!(first.phase, Some(Phase::Setup));
        assert_eq!(first.error_kind, Some("DEPLOYMENT_ERROR"));
        assert!(first.message.as_deref().unwrap().contains("initializer failed"));
        assert_eq!(report.passed, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_fails_only_that_scenario() {
        let scenarios: Vec<Box<dyn Scenario>> =
            vec![Box::new(Stall), Box::new(MintAndCount)];

        let report = runner().run_suite("timeouts", &scenarios).await;
        assert_eq!(report.outcomes[0].phase, Some(Phase::Timeout));
        assert_eq!(report.outcomes[0].error_kind, Some("TIMEOUT"));
        assert!(report.outcomes[1].passed());
    }

    #[tokio::test]
    async fn test_scenarios_do_not_share_state() {
        let scenarios: Vec<Box<dyn Scenario>> = vec![
            Box::new(MintAndCount),
            Box::new(MintAndCount),
            Box::new(MintAndCount),
        ];

        let report = runner().run_suite("isolation", &scenarios).await;
        assert!(report.success(), "{:?}", report);
    }

    #[tokio::test]
    async fn test_assertion_failure_reports_verify_phase() {
        let yaml = r#"
name: wrong symbol
scenarios:
  - name: symbol mismatch
    verify:
      - call: symbol
        equals: MNT
  - name: still runs
    verify:
      - call: name
        equals: Momento NFT
"#;
        let scenarios = from_file(ScenarioFile::parse(yaml).unwrap(), "ERC721Momento");
        let report = runner().run_suite("wrong symbol", &scenarios).await;

        let failed = &report.outcomes[0];
        assert_eq!(failed.phase, Some(Phase::Verify));
        assert_eq!(failed.error_kind, Some("ASSERTION_FAILURE"));
        let message = failed.message.as_deref().unwrap();
        assert!(message.contains("MNT"));
        assert!(message.contains("MNTNFT"));
        assert!(report.outcomes[1].passed());
    }

    #[tokio::test]
    async fn test_revert_fails_execute_phase() {
        let yaml = r#"
name: reverts
scenarios:
  - name: zero quantity
    execute:
      - call: createItem
        args: [0]
  - name: zero quantity expected
    execute:
      - call: createItem
        args: [0]
        expect_revert: true
    verify:
      - call: itemCount
        equals: 0
"#;
        let scenarios = from_file(ScenarioFile::parse(yaml).unwrap(), "ERC721Momento");
        let report = runner().run_suite("reverts", &scenarios).await;

        assert_eq!(report.outcomes[0].phase, Some(Phase::Execute));
        assert_eq!(report.outcomes[0].error_kind, Some("CALL_REVERTED"));
        assert!(report.outcomes[1].passed());
    }

    #[tokio::test]
    async fn test_expected_revert_accepts_unknown_method() {
        let yaml = r#"
name: unsupported methods
scenarios:
  - name: transfer is not implemented
    execute:
      - call: transferFrom
        args: ["0xac00000000000000000000000000000000000000", 1]
        expect_revert: true
  - name: transfer without expectation
    execute:
      - call: transferFrom
"#;
        let scenarios = from_file(ScenarioFile::parse(yaml).unwrap(), "ERC721Momento");
        let report = runner().run_suite("unsupported methods", &scenarios).await;

        assert!(report.outcomes[0].passed(), "{:?}", report.outcomes[0]);
        assert_eq!(report.outcomes[1].phase, Some(Phase::Execute));
        assert_eq!(report.outcomes[1].error_kind, Some("CALL_REVERTED"));
    }

    #[tokio::test]
    async fn test_rerun_gives_identical_outcomes() {
        let mut scenarios = momento_suite("ERC721Momento");
        scenarios.push(Box::new(MintAndCount));
        scenarios.extend(momento_suite("Missing"));

        let runner = runner();
        let first = runner.run_suite("rerun", &scenarios).await;
        let second = runner.run_suite("rerun", &scenarios).await;
        assert_eq!(summary(&first), summary(&second));
    }

    #[test]
    fn test_run_report_success_and_json() {
        let pass = SuiteReport::new(
            "a",
            vec![ScenarioOutcome {
                name: "x".into(),
                contract: "ERC721Momento".into(),
                status: Status::Pass,
                phase: None,
                error_kind: None,
                message: None,
                duration_ms: 1,
            }],
        );
        let fail = SuiteReport::new(
            "b",
            vec![ScenarioOutcome {
                name: "y".into(),
                contract: "ERC721Momento".into(),
                status: Status::Fail,
                phase: Some(Phase::Setup),
                error_kind: Some("DEPLOYMENT_ERROR"),
                message: Some("boom".into()),
                duration_ms: 1,
            }],
        );

        assert!(RunReport::new(vec![pass.clone()]).success);
        let report = RunReport::new(vec![pass, fail]);
        assert!(!report.success);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["suites"][1]["outcomes"][0]["status"], "FAIL");
        assert_eq!(json["suites"][1]["outcomes"][0]["phase"], "setup");
        assert!(json["suites"][0]["outcomes"][0].get("phase").is_none());
    }
}
