//! CLI to Config conversion utilities

use crate::config::cli::{AccumulatorArg, DistributionArg, OutputArg, PartitionArg};
use crate::config::{OutputFormat, ValueDistribution};
use crate::coordinator::PartitionStrategy;
use crate::worker::AccumulatorMode;

impl From<PartitionArg> for PartitionStrategy {
    fn from(arg: PartitionArg) -> Self {
        match arg {
            PartitionArg::Remainder => PartitionStrategy::Remainder,
            PartitionArg::Even => PartitionStrategy::Even,
        }
    }
}

impl From<AccumulatorArg> for AccumulatorMode {
    fn from(arg: AccumulatorArg) -> Self {
        match arg {
            AccumulatorArg::Precise => AccumulatorMode::Precise,
            AccumulatorArg::Truncating => AccumulatorMode::Truncating,
        }
    }
}

impl From<DistributionArg> for ValueDistribution {
    fn from(arg: DistributionArg) -> Self {
        match arg {
            DistributionArg::Uniform => ValueDistribution::Uniform,
            DistributionArg::Gaussian => ValueDistribution::Gaussian,
        }
    }
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_conversion() {
        assert_eq!(PartitionStrategy::from(PartitionArg::Remainder), PartitionStrategy::Remainder);
        assert_eq!(PartitionStrategy::from(PartitionArg::Even), PartitionStrategy::Even);
    }

    #[test]
    fn test_accumulator_conversion() {
        assert_eq!(AccumulatorMode::from(AccumulatorArg::Precise), AccumulatorMode::Precise);
        assert_eq!(AccumulatorMode::from(AccumulatorArg::Truncating), AccumulatorMode::Truncating);
    }

    #[test]
    fn test_output_and_distribution_conversion() {
        assert_eq!(OutputFormat::from(OutputArg::Json), OutputFormat::Json);
        assert_eq!(ValueDistribution::from(DistributionArg::Gaussian), ValueDistribution::Gaussian);
    }
}
