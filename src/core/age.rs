use chrono::{Datelike, NaiveDate};

/// Accepted birth-date layouts, tried in order
///
/// chrono accepts one or two digits for `%d` and `%m`, so `5/3/1999` and
/// `05/03/1999` both match the first layout.
const BIRTH_DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d"];

/// Parse a textual birth date with the first layout that fits
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    BIRTH_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// Whole years between `birth` and `today`
///
/// Returns `None` for birth dates in the future.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birth > today {
        return None;
    }

    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }

    u32::try_from(years).ok()
}

/// Age derived from an optional textual birth date
pub fn derive_age(date_of_birth: Option<&str>, today: NaiveDate) -> Option<u32> {
    date_of_birth
        .and_then(parse_birth_date)
        .and_then(|birth| age_on(birth, today))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(parse_birth_date("05/03/1999"), Some(date(1999, 3, 5)));
        assert_eq!(parse_birth_date("5/3/1999"), Some(date(1999, 3, 5)));
        assert_eq!(parse_birth_date("15-11-2001"), Some(date(2001, 11, 15)));
        assert_eq!(parse_birth_date("1.12.1990"), Some(date(1990, 12, 1)));
        assert_eq!(parse_birth_date("1998-07-21"), Some(date(1998, 7, 21)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_birth_date(""), None);
        assert_eq!(parse_birth_date("not a date"), None);
        assert_eq!(parse_birth_date("31/02/2000"), None);
        assert_eq!(parse_birth_date("12/13/2000"), None);
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let birth = date(2000, 6, 15);

        assert_eq!(age_on(birth, date(2025, 6, 14)), Some(24));
        assert_eq!(age_on(birth, date(2025, 6, 15)), Some(25));
        assert_eq!(age_on(birth, date(2025, 12, 31)), Some(25));
    }

    #[test]
    fn test_future_birth_date_is_undefined() {
        assert_eq!(age_on(date(2030, 1, 1), date(2025, 1, 1)), None);
    }

    #[test]
    fn test_derive_age() {
        let today = date(2025, 1, 10);
        assert_eq!(derive_age(Some("10/01/2000"), today), Some(25));
        assert_eq!(derive_age(Some("11/1/2000"), today), Some(24));
        assert_eq!(derive_age(Some("someday"), today), None);
        assert_eq!(derive_age(None, today), None);
    }
}
