//! Filter flags shared by the filter-aware subcommands.

use clap::Args;
use std::collections::BTreeSet;

use evf_data::filter::FilterCriteria;

/// Multi-select filter flags, mirroring the dashboard's sidebar controls.
/// Omitting a flag leaves that dimension unrestricted; omitting `--years`
/// selects all known years.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Years to keep, comma-delimited (e.g. --years 2021,2022)
    #[arg(long, value_delimiter = ',')]
    pub years: Vec<i32>,

    /// Regions to keep, comma-delimited
    #[arg(long, value_delimiter = ',')]
    pub regions: Vec<String>,

    /// Vehicle statuses to keep, comma-delimited
    #[arg(long, value_delimiter = ',')]
    pub statuses: Vec<String>,

    /// Major ignition causes to keep, comma-delimited
    #[arg(long, value_delimiter = ',')]
    pub causes: Vec<String>,

    /// Minor ignition causes to keep, comma-delimited
    #[arg(long, value_delimiter = ',')]
    pub subcauses: Vec<String>,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            years: if self.years.is_empty() {
                None
            } else {
                Some(self.years.iter().copied().collect::<BTreeSet<i32>>())
            },
            regions: self.regions.iter().cloned().collect(),
            statuses: self.statuses.iter().cloned().collect(),
            causes: self.causes.iter().cloned().collect(),
            subcauses: self.subcauses.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_means_no_restriction() {
        let criteria = FilterArgs::default().to_criteria();
        assert_eq!(criteria, FilterCriteria::default());
        assert!(criteria.years.is_none());
    }

    #[test]
    fn flags_become_selection_sets() {
        let args = FilterArgs {
            years: vec![2022, 2021],
            regions: vec!["Seoul".to_string()],
            ..FilterArgs::default()
        };
        let criteria = args.to_criteria();
        assert_eq!(criteria.years, Some(BTreeSet::from([2021, 2022])));
        assert!(criteria.regions.contains("Seoul"));
        assert!(criteria.statuses.is_empty());
    }
}
