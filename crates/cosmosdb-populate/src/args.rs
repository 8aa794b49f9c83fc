//! CLI argument definitions for the populator.

use clap::Args;

/// Arguments for a populate run.
#[derive(Args, Clone, Debug)]
pub struct PopulateArgs {
    /// Number of records to insert into the Cosmos DB container
    #[arg(long)]
    pub records: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        populate: PopulateArgs,
    }

    #[test]
    fn test_records_flag() {
        let cli = TestCli::try_parse_from(["booking-seed", "--records", "3"]).unwrap();
        assert_eq!(cli.populate.records, 3);
    }

    #[test]
    fn test_records_is_required() {
        assert!(TestCli::try_parse_from(["booking-seed"]).is_err());
    }

    #[test]
    fn test_records_rejects_negative() {
        assert!(TestCli::try_parse_from(["booking-seed", "--records", "-1"]).is_err());
    }
}
