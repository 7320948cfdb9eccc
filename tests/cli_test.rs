//! CLI Interface Tests
//!
//! Drives the `budget-fx` binary end to end. Every run gets its own `HOME`
//! so a developer's `~/.budget-fx/config.toml` never leaks into the results.

#[cfg(test)]
mod cli_tests {
    use std::fs;
    use std::path::Path;
    use std::process::{Command, Output};
    use tempfile::{tempdir, TempDir};

    fn budget_fx(home: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_budget-fx"))
            .args(args)
            .env("HOME", home)
            .env("NO_COLOR", "1")
            .env_remove("CLICOLOR_FORCE")
            .env_remove("RUST_LOG")
            .output()
            .expect("failed to run budget-fx")
    }

    fn stdout(output: &Output) -> String {
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    fn stderr(output: &Output) -> String {
        String::from_utf8_lossy(&output.stderr).into_owned()
    }

    fn home_with_config(contents: &str) -> TempDir {
        let home = tempdir().unwrap();
        let dir = home.path().join(".budget-fx");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), contents).unwrap();
        home
    }

    const OBSERVATIONS: &str = "CountryISO,Indicator,FiscalYear,Value,Unit\n\
                                ZAF,total_revenue_actual,2023,20.35,billion ZAR\n\
                                KEN,health_allocation_actual,2021,,billion KES\n\
                                MDG,debt_service_cost_actual,2022,850,million NGN\n";

    #[test]
    fn test_cli_help() {
        let home = tempdir().unwrap();
        let output = budget_fx(home.path(), &["--help"]);

        assert!(output.status.success());
        let out = stdout(&output);
        assert!(out.contains("budget-fx"));
        for command in ["parse", "convert", "rates", "normalize"] {
            assert!(out.contains(command), "help is missing {}", command);
        }
    }

    #[test]
    fn test_parse_command() {
        let home = tempdir().unwrap();
        let output = budget_fx(home.path(), &["parse", "billion ZAR"]);

        assert!(output.status.success());
        let out = stdout(&output);
        assert!(out.contains("Magnitude: billion"));
        assert!(out.contains("Multiplier: 1000000000"));
        assert!(out.contains("Currency: ZAR"));
    }

    #[test]
    fn test_parse_command_without_code() {
        let home = tempdir().unwrap();
        let output = budget_fx(home.path(), &["parse", "1 thing"]);

        assert!(output.status.success());
        let out = stdout(&output);
        assert!(out.contains("Magnitude: none"));
        assert!(out.contains("Currency: USD"));
    }

    #[test]
    fn test_convert_uses_year_table() {
        let home = tempdir().unwrap();

        let output = budget_fx(home.path(), &["convert", "20.35", "billion ZAR", "--year", "2023"]);
        assert!(output.status.success());
        assert!(stdout(&output).contains("1,102.98 million USD"));

        let output = budget_fx(home.path(), &["convert", "20.35", "billion ZAR", "-y", "2020"]);
        assert!(output.status.success());
        assert!(stdout(&output).contains("1,236.33 million USD"));
    }

    #[test]
    fn test_convert_verbose_reports_fallback() {
        let home = tempdir().unwrap();
        let output = budget_fx(
            home.path(),
            &["convert", "5", "million EUR", "--year", "2023", "--verbose"],
        );

        assert!(output.status.success());
        let out = stdout(&output);
        assert!(out.contains("5.00 million USD"));
        assert!(out.contains("Rate table: 2023"));
        assert!(out.contains("no rate for EUR, treated as USD"));
    }

    #[test]
    fn test_convert_with_config_override() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("fx.toml");
        fs::write(&config, "[custom_rates]\nZAR = 10.0\n").unwrap();

        let output = budget_fx(
            dir.path(),
            &[
                "convert",
                "20.35",
                "billion ZAR",
                "--year",
                "2023",
                "--config",
                config.to_str().unwrap(),
            ],
        );

        assert!(output.status.success());
        assert!(stdout(&output).contains("2,035.00 million USD"));
    }

    #[test]
    fn test_rates_default_table() {
        let home = tempdir().unwrap();
        let output = budget_fx(home.path(), &["rates"]);

        assert!(output.status.success());
        let out = stdout(&output);
        assert!(out.contains("Rate table: default"));
        assert!(out.contains("16.90"));
        assert!(out.contains("Year-specific tables: [2020, 2021, 2022, 2023, 2024, 2025]"));
        assert!(!out.contains("USD"));
    }

    #[test]
    fn test_rates_for_year() {
        let home = tempdir().unwrap();
        let output = budget_fx(home.path(), &["rates", "--year", "2024"]);

        assert!(output.status.success());
        let out = stdout(&output);
        assert!(out.contains("Rate table: 2024"));
        assert!(out.contains("1,483.99"));
        assert!(out.contains("suspected unit error"));
        assert!(!out.contains("Year-specific tables"));
    }

    #[test]
    fn test_rates_from_home_config() {
        let home = home_with_config("[custom_rates]\nZAR = 10.0\n");
        let output = budget_fx(home.path(), &["rates", "--year", "2024"]);

        assert!(output.status.success());
        let out = stdout(&output);
        assert!(out.contains("Rate table: custom"));
        assert!(out.contains("ZAR"));
        assert!(out.contains("10.00"));
        assert!(!out.contains("KES"));
    }

    #[test]
    fn test_explicit_config_beats_home_config() {
        let home = home_with_config("[custom_rates]\nZAR = 10.0\n");
        let config = home.path().join("empty.toml");
        fs::write(&config, "parallel = false\n").unwrap();

        let output = budget_fx(
            home.path(),
            &["rates", "--config", config.to_str().unwrap()],
        );

        assert!(output.status.success());
        assert!(stdout(&output).contains("Rate table: default"));
    }

    #[test]
    fn test_invalid_config_fails() {
        let home = home_with_config("[custom_rates]\nZAR = -1.0\n");
        let output = budget_fx(home.path(), &["rates"]);

        assert!(!output.status.success());
        assert!(stderr(&output).contains("Error:"));
    }

    #[test]
    fn test_normalize_to_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("budget.csv");
        let output_path = dir.path().join("budget_usd.csv");
        fs::write(&input, OBSERVATIONS).unwrap();

        let output = budget_fx(
            dir.path(),
            &[
                "normalize",
                input.to_str().unwrap(),
                "-o",
                output_path.to_str().unwrap(),
            ],
        );

        assert!(output.status.success());
        assert!(stdout(&output).is_empty());
        assert!(stderr(&output).contains("3 rows written"));

        let written = fs::read_to_string(&output_path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines[0],
            "CountryISO,Indicator,FiscalYear,Value,Unit,ValueUSD,UnitUSD,Flagged"
        );
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("ZAF,total_revenue_actual,2023,20.35,billion ZAR,1102.98"));
        assert!(lines[2].ends_with("billion KES,,,false"));
    }

    #[test]
    fn test_normalize_to_stdout_with_reject_policy() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("budget.csv");
        let config = dir.path().join("fx.toml");
        fs::write(&input, OBSERVATIONS).unwrap();
        fs::write(&config, "currency_policy = \"reject\"\n").unwrap();

        let output = budget_fx(
            dir.path(),
            &[
                "normalize",
                input.to_str().unwrap(),
                "--config",
                config.to_str().unwrap(),
            ],
        );

        assert!(output.status.success());
        let out = stdout(&output);
        assert!(out.starts_with("CountryISO,Indicator,FiscalYear,Value,Unit,ValueUSD,UnitUSD,Flagged"));
        assert!(out.contains("MDG,debt_service_cost_actual,2022,850.0,million NGN,,,true"));
    }

    #[test]
    fn test_normalize_missing_input() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let output = budget_fx(dir.path(), &["normalize", missing.to_str().unwrap()]);

        assert!(!output.status.success());
        let err = stderr(&output);
        assert!(err.contains("Error:"));
        assert!(err.contains("missing.csv"));
    }
}
