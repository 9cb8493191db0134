use cardwise_agent::OracleClient;
use cardwise_core::catalog;
use cardwise_core::config::{AppConfig, LoadOptions};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_catalog(&config));
            checks.push(check_oracle(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "catalog_readiness",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(DoctorCheck {
                name: "oracle_readiness",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_ok = checks.iter().all(|check| check.status != CheckStatus::Fail);
    let overall_status = if all_ok { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_ok {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_catalog(config: &AppConfig) -> DoctorCheck {
    match catalog::load_from_path(&config.catalog.path) {
        Ok(snapshot) => DoctorCheck {
            name: "catalog_readiness",
            status: CheckStatus::Pass,
            details: format!(
                "loaded {} card(s) from `{}`",
                snapshot.len(),
                config.catalog.path.display()
            ),
        },
        Err(error) => DoctorCheck {
            name: "catalog_readiness",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn check_oracle(config: &AppConfig) -> DoctorCheck {
    if !config.oracle.enabled {
        return DoctorCheck {
            name: "oracle_readiness",
            status: CheckStatus::Skipped,
            details: "oracle disabled; conversation runs in heuristic-only mode".to_string(),
        };
    }

    match OracleClient::from_config(&config.oracle) {
        Ok(_) => DoctorCheck {
            name: "oracle_readiness",
            status: CheckStatus::Pass,
            details: format!("client constructed for model `{}`", config.oracle.model),
        },
        Err(error) => DoctorCheck {
            name: "oracle_readiness",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
