//! Demo catalog used to seed an empty store.

use chrono::{Days, NaiveDateTime};
use common::search_result::Opportunity;

use crate::db_utils::opportunity_store::{NewFundingRecord, OpportunityStatus};

pub const SAMPLE_OPPORTUNITY_COUNT: usize = 52;

const COUNTRIES: [&str; 8] = [
    "United States", "United Kingdom", "Canada", "Germany",
    "Australia", "European Union", "Global", "France",
];
const ORGANIZATIONS: [&str; 8] = [
    "National Institutes of Health", "Wellcome Trust", "National Science Foundation",
    "European Research Council", "Gates Foundation", "Alfred P. Sloan Foundation",
    "Simons Foundation", "Chan Zuckerberg Initiative",
];
const RESEARCH_AREAS: [&str; 8] = [
    "Biomedical Sciences", "Life Sciences", "STEM", "All Fields",
    "Global Health", "Computer Science", "Physics", "Environmental Science",
];
const TAGS: [&str; 5] = ["Early Career", "Fellowship", "Research Grant", "Travel Grant", "Seed Funding"];
const AMOUNTS: [u64; 7] = [50_000, 100_000, 250_000, 500_000, 1_000_000, 1_500_000, 2_000_000];

/// Builds `count` active opportunities. The output only depends on `count`
/// and `now`; deadlines fall 30 to 364 days after `now`.
pub fn generate_sample_records(count: usize, now: NaiveDateTime) -> Vec<NewFundingRecord> {
    (1..=count)
        .map(|i| {
            let organization = ORGANIZATIONS[(i * 3) % ORGANIZATIONS.len()];
            let research_area = RESEARCH_AREAS[(i * 5) % RESEARCH_AREAS.len()];
            let country = COUNTRIES[(i * 7) % COUNTRIES.len()];
            let amount = AMOUNTS[(i * 11) % AMOUNTS.len()];
            let days_ahead = 30 + (i as u64 * 37) % 335;
            let tag_count = 1 + i % 3;

            let mut opportunity = Opportunity::new(i as u64, format!("Sample Grant {i} for {research_area}"));
            opportunity.organization = organization.to_string();
            opportunity.country = country.to_string();
            opportunity.research_area = research_area.to_string();
            opportunity.description =
                format!("This is a sample description for grant {i} focusing on {research_area} by {organization}.");
            opportunity.eligibility_criteria = Some("Must be an eligible researcher or institution.".to_string());
            opportunity.application_url = format!("https://example.com/grant/{i}");
            opportunity.deadline = now.date().checked_add_days(Days::new(days_ahead));
            opportunity.amount_max = Some(amount);
            opportunity.amount_min = (i % 2 == 0).then_some(amount / 10 * 8);
            opportunity.tags = (0..tag_count).map(|k| TAGS[(i + k) % TAGS.len()].to_string()).collect();

            NewFundingRecord { opportunity, status: OpportunityStatus::Active, created_at: now }
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_sample_records(SAMPLE_OPPORTUNITY_COUNT, now());
        let b = generate_sample_records(SAMPLE_OPPORTUNITY_COUNT, now());
        assert_eq!(a.len(), SAMPLE_OPPORTUNITY_COUNT);
        let opportunities = |records: &[NewFundingRecord]| {
            records.iter().map(|r| r.opportunity.clone()).collect::<Vec<_>>()
        };
        assert_eq!(opportunities(&a), opportunities(&b));
    }

    #[test]
    fn records_stay_within_catalog() {
        let today = now().date();
        for record in generate_sample_records(SAMPLE_OPPORTUNITY_COUNT, now()) {
            let o = &record.opportunity;
            assert!(COUNTRIES.contains(&o.country.as_str()));
            assert!(ORGANIZATIONS.contains(&o.organization.as_str()));
            assert!(RESEARCH_AREAS.contains(&o.research_area.as_str()));
            assert!((1..=3).contains(&o.tags.len()));
            assert!(o.tags.iter().all(|t| TAGS.contains(&t.as_str())));
            let deadline = o.deadline.unwrap();
            assert!(deadline >= today + Days::new(30) && deadline < today + Days::new(365));
            if let Some(min) = o.amount_min {
                assert!(min <= o.amount_max.unwrap());
            }
        }
    }
}
