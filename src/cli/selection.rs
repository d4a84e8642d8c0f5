//! Selection flags shared by `generate` and `export`

use std::path::PathBuf;

use clap::Args;

use crate::config::RunOverrides;

/// Which transactions go into the report
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// Reporting month (YYYY-MM, default: previous month)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Bank export to read (.xlsx or .csv)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Reference account to report on
    #[arg(short, long, conflicts_with = "all_accounts")]
    pub account: Option<String>,

    /// Report on every account
    #[arg(long)]
    pub all_accounts: bool,

    /// Keep the sub-categories the settings exclude
    #[arg(long)]
    pub include_excluded: bool,

    /// Months loaded before the reporting month
    #[arg(short, long)]
    pub lookback: Option<u32>,
}

impl SelectionArgs {
    /// Overrides for a run; output and layout are left to the caller
    pub fn overrides(self) -> RunOverrides {
        RunOverrides {
            month: self.month,
            input: self.input,
            account: self.account,
            all_accounts: self.all_accounts,
            include_excluded: self.include_excluded,
            lookback: self.lookback,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        selection: SelectionArgs,
    }

    fn parse(args: &[&str]) -> Result<SelectionArgs, clap::Error> {
        Harness::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .map(|h| h.selection)
    }

    #[test]
    fn test_flags_map_to_overrides() {
        let overrides = parse(&[
            "--month",
            "2025-02",
            "--input",
            "export.csv",
            "--include-excluded",
            "--lookback",
            "3",
        ])
        .unwrap()
        .overrides();

        assert_eq!(overrides.month.as_deref(), Some("2025-02"));
        assert_eq!(overrides.input, Some(PathBuf::from("export.csv")));
        assert!(overrides.include_excluded);
        assert_eq!(overrides.lookback, Some(3));
        assert!(!overrides.detailed);
        assert_eq!(overrides.output_dir, None);
    }

    #[test]
    fn test_account_conflicts_with_all_accounts() {
        assert!(parse(&["--account", "Girokonto", "--all-accounts"]).is_err());
    }
}
