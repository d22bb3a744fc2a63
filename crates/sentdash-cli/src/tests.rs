use super::*;
use crate::dashboard::render_summary_table;
use crate::mock::MockOverrides;
use sentdash_analytics::{CompanyAggregate, SentimentSummary, TopTweets, TopicSummary};
use sentdash_mock::MockConfig;
use std::path::PathBuf;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["sentdash-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["sentdash-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["sentdash-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn mock_generate_defaults_to_config_values() {
    let cli = Cli::try_parse_from(["sentdash-cli", "mock", "generate"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Mock {
            command: MockCommands::Generate {
                per_company: None,
                history_days: None,
                seed: None,
                dry_run: false,
            }
        })
    ));
}

#[test]
fn mock_generate_accepts_overrides_and_dry_run() {
    let cli = Cli::try_parse_from([
        "sentdash-cli",
        "mock",
        "generate",
        "--per-company",
        "100",
        "--history-days",
        "14",
        "--seed",
        "7",
        "--dry-run",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Mock {
            command: MockCommands::Generate {
                per_company: Some(100),
                history_days: Some(14),
                seed: Some(7),
                dry_run: true,
            }
        })
    ));
}

#[test]
fn mock_overrides_replace_only_given_fields() {
    let base = MockConfig {
        tweets_per_company: 5000,
        history_days: 365,
        seed: 42,
    };
    let merged = MockOverrides {
        per_company: Some(10),
        history_days: None,
        seed: Some(1),
    }
    .apply(base);
    assert_eq!(
        merged,
        MockConfig {
            tweets_per_company: 10,
            history_days: 365,
            seed: 1,
        }
    );
    assert_eq!(MockOverrides::default().apply(base), base);
}

#[test]
fn mock_generate_bounds_per_company() {
    let parse = |n: &str| {
        Cli::try_parse_from(["sentdash-cli", "mock", "generate", "--per-company", n])
    };
    assert!(parse("0").is_err());
    assert!(parse("100001").is_err());
    assert!(parse("18446744073709551615").is_err());
    assert!(parse("100000").is_ok());
}

#[test]
fn dashboard_export_defaults() {
    let cli = Cli::try_parse_from(["sentdash-cli", "dashboard", "export"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Dashboard {
            command: DashboardCommands::Export {
                days: None,
                output: None,
                database_url: None,
            }
        })
    ));
}

#[test]
fn dashboard_export_with_all_flags() {
    let cli = Cli::try_parse_from([
        "sentdash-cli",
        "dashboard",
        "export",
        "--days",
        "7",
        "--output",
        "out/dashboard.json",
        "--database-url",
        "postgres://localhost/sentdash",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Dashboard {
            command: DashboardCommands::Export {
                days: Some(7),
                output: Some(ref path),
                database_url: Some(ref url),
            }
        }) if *path == PathBuf::from("out/dashboard.json") && url == "postgres://localhost/sentdash"
    ));
}

#[test]
fn dashboard_rejects_zero_days() {
    assert!(Cli::try_parse_from(["sentdash-cli", "dashboard", "export", "--days", "0"]).is_err());
    assert!(Cli::try_parse_from(["sentdash-cli", "dashboard", "summary", "--days", "0"]).is_err());
}

#[test]
fn dashboard_summary_days() {
    let cli = Cli::try_parse_from(["sentdash-cli", "dashboard", "summary", "--days", "90"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Dashboard {
            command: DashboardCommands::Summary { days: Some(90) }
        })
    ));
}

#[test]
fn summary_table_lists_each_company() {
    let dashboard = vec![CompanyAggregate {
        company: "Acme".to_string(),
        logo_url: String::new(),
        time_period: "Last 30 days".to_string(),
        sentiment_summary: SentimentSummary {
            overall_score: 0.63,
            positive_percentage: 67,
            negative_percentage: 33,
            neutral_percentage: 0,
            total_tweets: 3,
        },
        sentiment_trend: Vec::new(),
        top_tweets: TopTweets::default(),
        key_topics: vec![
            TopicSummary {
                topic: "Love".to_string(),
                count: 1,
                sentiment_score: 0.9,
            },
            TopicSummary {
                topic: "Acme".to_string(),
                count: 3,
                sentiment_score: 0.63,
            },
        ],
    }];

    let table = render_summary_table(&dashboard);
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("COMPANY"));
    assert!(lines[1].starts_with("Acme"));
    assert!(lines[1].contains("0.63"));
    assert!(lines[1].ends_with("Love, Acme"));
}
