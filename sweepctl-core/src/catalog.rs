//! The fixed command and flag lists the exerciser walks through
//!
//! Many entries are wrong on purpose: missing arguments, unknown keys,
//! arguments in the wrong order, files that do not exist. Duplicates are
//! kept as-is so repeated installs are exercised too.

use crate::config::SweepConfig;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Where a stage's job id comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobMode {
    /// No job id on the line
    None,
    /// One job started before the stage, shared by every pair
    Shared(String),
    /// A fresh job started before every pair
    PerInvocation(String),
}

/// Stage names, in run order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    General,
    Jobs,
    Cancel,
    Diagnostics,
}

impl StageName {
    pub const ALL: [StageName; 4] = [
        StageName::General,
        StageName::Jobs,
        StageName::Cancel,
        StageName::Diagnostics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageName::General => "general",
            StageName::Jobs => "jobs",
            StageName::Cancel => "cancel",
            StageName::Diagnostics => "diagnostics",
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StageName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StageName::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown stage '{}' (expected one of: general, jobs, cancel, diagnostics)",
                    s
                )
            })
    }
}

/// A batch of combinations sharing a job mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub name: StageName,
    pub commands: Vec<String>,
    pub flags: Vec<String>,
    pub job: JobMode,
}

impl Stage {
    /// Number of invocations of the external CLI this stage makes
    pub fn combination_count(&self) -> usize {
        self.commands.len() * self.flags.len()
    }
}

/// General commands: auditlog, user, run, jobs, license
pub fn commands(config: &SweepConfig) -> Vec<String> {
    let server = config.license_server.as_str();
    let mut commands: Vec<String> = [
        "auditlog",
        "auditlog dump",
        "auditlog help",
        "user list",
        "user add",
        "user add hej",
        "user add hej pw",
        "user add hej password",
        "user add hej password moar",
        "user edit hej2",
        "user edit hej admin=true",
        "user edit hej admin=false",
        "user edit hej password=pw",
        "user edit hej nope=asda",
        "user edit nope",
        "user delete",
        "user delete nope",
        "user delete hej",
        "user import users.csv",
        "run",
        "run help",
        "run project",
        "run project help",
        "run project noneExisting.xml",
        "run project runtimeerror.xml",
        "run project validationerror.xml",
        "run project successful.xml",
        "run project successful.xml testsuite=\"TestSuite 1\"",
        "run project successful.xml testsuite=\"TestSuite 1\" securitytest=\"blah\"",
        "run project successful.xml testsuite=\"TestSuite 1\" testcase=\"TestCase 1\"",
        "run project successful.xml testcase=\"TestCase 1\"",
        "run project successful.xml testcase=\"TestCase 1\" securitytest=\"blah\"",
        "run project testsuite=\"TestSuite 1\" successful.xml",
        "run project testsuite=\"TestSuite 1\" securitytest=\"blah\" successful.xml",
        "run project testsuite=\"TestSuite 1\" testcase=\"TestCase 1\" successful.xml",
        "run project testcase=\"TestCase 1\" successful.xml",
        "run project testcase=\"TestCase 1\" securitytest=\"blah\" successful.xml",
        "run project successful.xml printReport",
        "run project successful.xml printReport async",
        "jobs list user=lol",
        "jobs list user=admin",
        "jobs list user=regular",
        "jobs help",
        "jobs prune before=2018-01-01",
        "jobs prune before=dasdasdas",
        "license install",
        "license install type=floating",
        "license install type=fixed",
        "license install type=noneExisting",
        "license install type=floating",
        "license install type=floating",
        "license uninstall",
    ]
    .into_iter()
    .map(String::from)
    .collect();

    commands.extend([
        format!("license install type=floating {server}"),
        "license install type=floating noneExisting:1234".to_string(),
        "license install type=floating file.txt".to_string(),
        format!("license install type=floating noneExisting=text {server}"),
        format!("license install type=floating email=notMail {server}"),
        format!("license install type=floating firstName=oskar {server}"),
        format!("license install type=floating lastName=oskarsson {server}"),
        format!("license install type=floating email=oskar@oskarsson.com {server}"),
        format!(
            "license install type=floating firstName=oskar lastName=oskarsson \
             email=oskar@oskarsson.com {server}"
        ),
    ]);

    commands
}

/// Global flag variants, including missing arguments and a wrong host
///
/// The admin config and the real host follow `admin_config` and
/// `server_host`; the wrong host and the regular-user config stay fixed.
pub fn flags(config: &SweepConfig) -> Vec<String> {
    vec![
        "-C".to_string(),
        "-c".to_string(),
        format!("-C {}", config.admin_config),
        "-H localhost:1231".to_string(),
        format!("-H {}", config.server_host),
        "-c regularUser.config".to_string(),
        format!("-c {}", config.admin_config),
    ]
}

/// Commands that take a job id right after the subcommand
pub fn job_commands() -> Vec<String> {
    [
        "jobs status",
        "jobs printReport",
        "jobs report",
        "jobs report output=.",
        "jobs report output=noneExisting",
        "jobs report output=. reportFileName=report",
        "jobs report output=output noneExisting=report.txt",
        "jobs report output=output reportFileName=report format=junit",
        "jobs report output=output reportFileName=report format=excel",
        "jobs report output=output reportFileName=report format=json",
        "jobs report output=output reportFileName=report format=pdf",
        "jobs report output=. reportFileName=report format=noneExisting",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Commands that need a job that is still running
pub fn cancel_commands() -> Vec<String> {
    vec!["jobs cancel".to_string()]
}

pub fn diagnostic_commands() -> Vec<String> {
    vec![
        "diagnostics version".to_string(),
        "diagnostics help".to_string(),
    ]
}

/// Diagnostics only run against the configured server, with a scheme
pub fn diagnostic_flags(config: &SweepConfig) -> Vec<String> {
    vec![format!("-H http://{}", config.server_host)]
}

/// All stages, in run order
pub fn stages(config: &SweepConfig) -> Vec<Stage> {
    vec![
        Stage {
            name: StageName::General,
            commands: commands(config),
            flags: flags(config),
            job: JobMode::None,
        },
        Stage {
            name: StageName::Jobs,
            commands: job_commands(),
            flags: flags(config),
            job: JobMode::Shared(config.fast_project.clone()),
        },
        Stage {
            name: StageName::Cancel,
            commands: cancel_commands(),
            flags: flags(config),
            job: JobMode::PerInvocation(config.slow_project.clone()),
        },
        Stage {
            name: StageName::Diagnostics,
            commands: diagnostic_commands(),
            flags: diagnostic_flags(config),
            job: JobMode::None,
        },
    ]
}

/// The stages whose names are in `wanted`, still in run order
///
/// An empty selection means every stage.
pub fn select_stages(config: &SweepConfig, wanted: &[StageName]) -> Vec<Stage> {
    stages(config)
        .into_iter()
        .filter(|stage| wanted.is_empty() || wanted.contains(&stage.name))
        .collect()
}
