// The `status` administrative command

use crate::observability::{health::style_success, HealthChecker, HealthReport};
use std::io::Write;

/// Check every dependency and write the report as a single line.
///
/// Dependency failures only show up inside the report; the only error this
/// returns is a failure to write to `out`.
pub async fn run<W: Write>(
    checker: &HealthChecker,
    out: &mut W,
    colored: bool,
) -> std::io::Result<HealthReport> {
    let report = checker.check_health().await;

    writeln!(out, "{}", style_success(&report.status_line(), colored))?;
    out.flush()?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::health::testing::checker;

    async fn output(geodb_up: bool, storage_up: bool) -> String {
        let mut out = Vec::new();
        run(&checker(geodb_up, storage_up), &mut out, false)
            .await
            .expect("status command must not fail");
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_writes_one_line_for_every_outcome() {
        let cases = [
            (true, true, "{'geodb': 'ok', 'storage': 'ok'}"),
            (false, true, "{'geodb': 'error', 'storage': 'ok'}"),
            (true, false, "{'geodb': 'ok', 'storage': 'error'}"),
            (false, false, "{'geodb': 'error', 'storage': 'error'}"),
        ];

        for (geodb_up, storage_up, rendered) in cases {
            let out = output(geodb_up, storage_up).await;
            assert_eq!(
                out,
                format!("Everything seems to work properly: {}\n", rendered)
            );
            assert_eq!(out.lines().count(), 1);
        }
    }

    #[tokio::test]
    async fn test_colored_output() {
        let mut out = Vec::new();
        run(&checker(true, true), &mut out, true).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("\x1b[32;1mEverything seems to work properly"));
        assert!(out.ends_with("\x1b[0m\n"));
    }

    #[tokio::test]
    async fn test_misconfigured_dependencies_are_reported() {
        let mut config = crate::Config::load().expect("Failed to load config");
        config.geodb.host = String::new();
        config.storage.endpoint_url = String::new();

        let checker = crate::health_checker(&config).expect("checker builds without endpoints");
        let mut out = Vec::new();
        let report = run(&checker, &mut out, false).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Everything seems to work properly: {'geodb': 'error', 'storage': 'error'}\n"
        );
        assert!(!report.all_ok());
    }
}
