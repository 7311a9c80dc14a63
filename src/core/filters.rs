use chrono::NaiveDate;
use crate::core::age::derive_age;
use crate::models::{AgeRange, FilterConfig, Post, Profile, RatingBucket};

/// Check a profile against every configured constraint
///
/// Constraints are conjunctive. An unset constraint never excludes; a profile
/// missing a field that an active constraint needs is excluded.
#[inline]
pub fn matches_filter(profile: &Profile, config: &FilterConfig, today: NaiveDate) -> bool {
    matches_city(profile.city.as_deref(), config)
        && matches_locality(profile.locality.as_deref(), config)
        && matches_text(active(&config.high_school), profile.high_school.as_deref())
        && matches_text(active(&config.college), profile.college.as_deref())
        && matches_text(active(&config.post_grad), profile.post_grad.as_deref())
        && matches_text(active(&config.work), profile.work.as_deref())
        && matches_age_range(profile, config.age_range, today)
        && matches_rating(profile.average_rating(), config.rating)
        && matches_gender(profile, config)
}

/// Location constraints for posts, matched against any location tag
///
/// Profile-only constraints do not apply to posts.
#[inline]
pub fn matches_post_filter(post: &Post, config: &FilterConfig) -> bool {
    let city_ok = match city_constraint(config) {
        Some(city) => post.location_tags.iter().any(|tag| eq_ignore_case(tag, city)),
        None => true,
    };

    let locality_ok = config.localities.is_empty()
        || post.location_tags.iter().any(|tag| config.localities.contains(tag));

    city_ok && locality_ok
}

/// City constraint, skipping blank and the "All" sentinel
pub fn city_constraint(config: &FilterConfig) -> Option<&str> {
    active(&config.city).filter(|city| !city.eq_ignore_ascii_case("all"))
}

#[inline]
pub fn matches_city(city: Option<&str>, config: &FilterConfig) -> bool {
    matches_text(city_constraint(config), city)
}

/// Exact membership in the configured locality set
#[inline]
pub fn matches_locality(locality: Option<&str>, config: &FilterConfig) -> bool {
    if config.localities.is_empty() {
        return true;
    }

    locality.is_some_and(|locality| config.localities.contains(locality))
}

/// Case-insensitive equality when a constraint is present
#[inline]
pub fn matches_text(constraint: Option<&str>, value: Option<&str>) -> bool {
    match constraint {
        Some(expected) => value.is_some_and(|value| eq_ignore_case(value, expected)),
        None => true,
    }
}

/// Inclusive age bounds; an undefined age fails an active range
#[inline]
pub fn matches_age_range(profile: &Profile, range: Option<AgeRange>, today: NaiveDate) -> bool {
    match range.filter(AgeRange::is_active) {
        Some(range) => derive_age(profile.date_of_birth.as_deref(), today)
            .is_some_and(|age| range.contains(age)),
        None => true,
    }
}

#[inline]
pub fn matches_rating(average_rating: f64, bucket: Option<RatingBucket>) -> bool {
    bucket.map_or(true, |bucket| bucket.contains(average_rating))
}

#[inline]
pub fn matches_gender(profile: &Profile, config: &FilterConfig) -> bool {
    match config.gender.as_ref().filter(|gender| !gender.is_unspecified()) {
        Some(gender) => profile.gender == *gender,
        None => true,
    }
}

fn active(constraint: &Option<String>) -> Option<&str> {
    constraint
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn create_test_profile() -> Profile {
        Profile {
            user_id: "test_user".to_string(),
            name: "Test User".to_string(),
            date_of_birth: Some("15/06/1999".to_string()),
            locality: Some("Salt Lake".to_string()),
            city: Some("Kolkata".to_string()),
            high_school: Some("South Point".to_string()),
            college: Some("Jadavpur University".to_string()),
            gender: Gender::Female,
            ratings: vec![4.5],
            ..Profile::default()
        }
    }

    #[test]
    fn test_empty_config_passes() {
        let profile = create_test_profile();
        assert!(matches_filter(&profile, &FilterConfig::default(), today()));
        assert!(matches_filter(&Profile::new("bare"), &FilterConfig::default(), today()));
    }

    #[test]
    fn test_city_case_insensitive_and_all_sentinel() {
        let profile = create_test_profile();
        let mut config = FilterConfig {
            city: Some("KOLKATA".to_string()),
            ..FilterConfig::default()
        };
        assert!(matches_filter(&profile, &config, today()));

        config.city = Some("Mumbai".to_string());
        assert!(!matches_filter(&profile, &config, today()));

        config.city = Some("All".to_string());
        assert!(matches_filter(&profile, &config, today()));
    }

    #[test]
    fn test_locality_is_exact() {
        let profile = create_test_profile();
        let mut config = FilterConfig::default();
        config.localities.insert("salt lake".to_string());
        assert!(!matches_filter(&profile, &config, today()));

        config.localities.insert("Salt Lake".to_string());
        assert!(matches_filter(&profile, &config, today()));
    }

    #[test]
    fn test_missing_field_fails_active_constraint() {
        let mut profile = create_test_profile();
        profile.work = None;
        let config = FilterConfig {
            work: Some("Acme".to_string()),
            ..FilterConfig::default()
        };

        assert!(!matches_filter(&profile, &config, today()));
    }

    #[test]
    fn test_blank_constraint_is_unset() {
        let profile = create_test_profile();
        let config = FilterConfig {
            college: Some("   ".to_string()),
            gender: Some(Gender::default()),
            ..FilterConfig::default()
        };

        assert!(matches_filter(&profile, &config, today()));
    }

    #[test]
    fn test_age_range() {
        let profile = create_test_profile();
        let mut config = FilterConfig {
            age_range: Some(AgeRange::new(18, 25)),
            ..FilterConfig::default()
        };
        assert!(matches_filter(&profile, &config, today()));

        config.age_range = Some(AgeRange::new(26, 40));
        assert!(!matches_filter(&profile, &config, today()));

        config.age_range = Some(AgeRange::new(0, 0));
        assert!(matches_filter(&profile, &config, today()));
    }

    #[test]
    fn test_gender_filter() {
        let profile = create_test_profile();
        let mut config = FilterConfig {
            gender: Some(Gender::parse("FEMALE")),
            ..FilterConfig::default()
        };
        assert!(matches_filter(&profile, &config, today()));

        config.gender = Some(Gender::Male);
        assert!(!matches_filter(&profile, &config, today()));
    }

    #[test]
    fn test_post_location_tags() {
        let mut post = Post::new("p1", "u1", Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        post.location_tags = vec!["Park Street".to_string(), "Kolkata".to_string()];

        let mut config = FilterConfig {
            city: Some("kolkata".to_string()),
            ..FilterConfig::default()
        };
        assert!(matches_post_filter(&post, &config));

        config.localities.insert("Park Street".to_string());
        assert!(matches_post_filter(&post, &config));

        config.localities.clear();
        config.localities.insert("Bandra".to_string());
        assert!(!matches_post_filter(&post, &config));
    }
}
