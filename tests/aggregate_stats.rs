// tests/aggregate_stats.rs
//
// Aggregation-engine properties over hand-built normalized postings:
// tie-breaking, share consistency, sample thresholds, empty-set sentinels.

use empleo_radar::aggregate::{
    self, city_share_pct, ranked_counts, safe_mode, salary_by_city, salary_by_role, share_pct,
};
use empleo_radar::model::{CompanyType, NormalizedPosting, RawPosting, RoleCategory};

fn posting(id: &str, city: Option<&str>) -> NormalizedPosting {
    NormalizedPosting {
        raw: RawPosting {
            id: id.to_string(),
            title: None,
            company: Some("Acme".into()),
            location: None,
            category: None,
            created: None,
            description: None,
            url: None,
            salary_min: None,
            salary_max: None,
            salary_is_predicted: false,
            salary_interval: None,
            currency: None,
        },
        company_type: CompanyType::DirectEmployer,
        city: city.map(str::to_string),
        role: RoleCategory::Other,
        skills: Vec::new(),
        is_remote: false,
        salary_value: None,
    }
}

#[test]
fn top_n_over_empty_input_is_empty_and_mode_is_none() {
    let empty: Vec<NormalizedPosting> = Vec::new();
    assert!(aggregate::top_skills(&empty, 10).is_empty());
    assert!(aggregate::top_cities(&empty, 10).is_empty());
    assert_eq!(safe_mode(std::iter::empty::<String>()), None);
    assert_eq!(share_pct(&empty, |_| true), 0.0);
}

#[test]
fn count_ties_break_by_first_encountered_order() {
    let rows = ranked_counts(
        ["madrid", "bilbao", "bilbao", "madrid", "valencia"]
            .iter()
            .map(|s| s.to_string()),
    );
    assert_eq!(rows[0].key, "madrid");
    assert_eq!(rows[0].count, 2);
    assert_eq!(rows[1].key, "bilbao");
    assert_eq!(rows[2].key, "valencia");
}

#[test]
fn shares_partition_the_filtered_set() {
    let set = vec![
        posting("1", Some("Madrid")),
        posting("2", Some("Madrid")),
        posting("3", Some("Barcelona")),
        posting("4", None),
        posting("5", Some("madrid ")),
        posting("6", Some("Valencia")),
        posting("7", Some("Barcelona")),
    ];
    let madrid = city_share_pct(&set, "Madrid");
    let not_madrid = share_pct(&set, |p| {
        p.city
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .as_deref()
            != Some("madrid")
    });
    assert!(
        (madrid + not_madrid - 100.0).abs() <= 0.1,
        "madrid={madrid} rest={not_madrid}"
    );
}

#[test]
fn salary_groups_respect_the_sample_threshold() {
    let min_n = 3;
    let mut set = Vec::new();
    for i in 0..min_n {
        let mut p = posting(&format!("m{i}"), Some("Madrid"));
        p.salary_value = Some(35_000.0);
        set.push(p);
    }
    for i in 0..(min_n - 1) {
        let mut p = posting(&format!("v{i}"), Some("Valencia"));
        p.salary_value = Some(50_000.0);
        set.push(p);
    }

    // Exactly min_n samples → included; min_n - 1 → excluded.
    let rows = salary_by_city(&set, min_n, 10);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key, "Madrid");
    assert_eq!(rows[0].n, min_n);
}

#[test]
fn salary_groups_rank_by_mean_descending() {
    let mut set = Vec::new();
    for (city, value) in [
        ("Madrid", 30_000.0),
        ("Madrid", 40_000.0),
        ("Barcelona", 50_000.0),
        ("Barcelona", 60_000.0),
    ] {
        let mut p = posting(city, Some(city));
        p.salary_value = Some(value);
        set.push(p);
    }
    let rows = salary_by_city(&set, 2, 10);
    assert_eq!(rows[0].key, "Barcelona");
    assert_eq!(rows[0].mean, 55_000.0);
    assert_eq!(rows[1].key, "Madrid");
    assert_eq!(rows[1].median, 35_000.0);
}

#[test]
fn salary_by_role_groups_under_role_labels() {
    let mut a = posting("1", None);
    a.role = RoleCategory::DataEngineer;
    a.salary_value = Some(45_000.0);
    let mut b = posting("2", None);
    b.role = RoleCategory::DataEngineer;
    b.salary_value = Some(47_000.0);

    let rows = salary_by_role(&[a, b], 2);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key, "Data Engineer");
    assert_eq!(rows[0].mean, 46_000.0);
}

#[test]
fn postings_without_salary_never_reach_salary_groups() {
    let mut with = posting("1", Some("Madrid"));
    with.salary_value = Some(30_000.0);
    let without = posting("2", Some("Madrid"));

    let rows = salary_by_city(&[with, without], 1, 10);
    assert_eq!(rows[0].n, 1);
}

#[test]
fn trend_counts_by_calendar_date() {
    let mut day1a = posting("1", None);
    day1a.raw.created = Some("2024-05-01T09:00:00Z".into());
    let mut day1b = posting("2", None);
    day1b.raw.created = Some("2024-05-01T21:00:00Z".into());
    let mut day2 = posting("3", None);
    day2.raw.created = Some("2024-05-02T10:00:00Z".into());
    let mut broken = posting("4", None);
    broken.raw.created = Some("05/01/2024".into());

    let rows = aggregate::daily_volume(&[day1a, day1b, day2, broken]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].count, 2);
    assert_eq!(rows[1].count, 1);
    assert!(rows[0].date < rows[1].date);
}
