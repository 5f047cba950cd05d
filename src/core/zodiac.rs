use crate::domain::model::ZodiacSign;
use chrono::{Datelike, NaiveDate};

/// First (month, day) of each sign, in calendar order from January.
const SIGN_STARTS: [(u32, u32, ZodiacSign); 12] = [
    (1, 20, ZodiacSign::Aquarius),
    (2, 19, ZodiacSign::Pisces),
    (3, 21, ZodiacSign::Aries),
    (4, 20, ZodiacSign::Taurus),
    (5, 21, ZodiacSign::Gemini),
    (6, 21, ZodiacSign::Cancer),
    (7, 23, ZodiacSign::Leo),
    (8, 23, ZodiacSign::Virgo),
    (9, 23, ZodiacSign::Libra),
    (10, 23, ZodiacSign::Scorpio),
    (11, 22, ZodiacSign::Sagittarius),
    (12, 22, ZodiacSign::Capricorn),
];

/// Tropical sun sign from month and day only; no chart required.
pub fn sun_sign_for_date(date: NaiveDate) -> ZodiacSign {
    let key = (date.month(), date.day());
    SIGN_STARTS
        .iter()
        .rev()
        .find(|(month, day, _)| key >= (*month, *day))
        .map(|(_, _, sign)| *sign)
        // 1 月 1 日至 1 月 19 日仍屬摩羯座
        .unwrap_or(ZodiacSign::Capricorn)
}
