//! TAI-UTC offset table

/// UTC instants (Unix milliseconds) at which TAI-UTC changed, with the new offset in seconds.
///
/// Before 1972 the offset is taken as 10 s, the value in force when leap
/// seconds were introduced.
const LEAP_TABLE: &[(i64, i64)] = &[
    (63_072_000_000, 10),    // 1972-01-01
    (78_796_800_000, 11),    // 1972-07-01
    (94_694_400_000, 12),    // 1973-01-01
    (126_230_400_000, 13),   // 1974-01-01
    (157_766_400_000, 14),   // 1975-01-01
    (189_302_400_000, 15),   // 1976-01-01
    (220_924_800_000, 16),   // 1977-01-01
    (252_460_800_000, 17),   // 1978-01-01
    (283_996_800_000, 18),   // 1979-01-01
    (315_532_800_000, 19),   // 1980-01-01
    (362_793_600_000, 20),   // 1981-07-01
    (394_329_600_000, 21),   // 1982-07-01
    (425_865_600_000, 22),   // 1983-07-01
    (489_024_000_000, 23),   // 1985-07-01
    (567_993_600_000, 24),   // 1988-01-01
    (631_152_000_000, 25),   // 1990-01-01
    (662_688_000_000, 26),   // 1991-01-01
    (709_948_800_000, 27),   // 1992-07-01
    (741_484_800_000, 28),   // 1993-07-01
    (773_020_800_000, 29),   // 1994-07-01
    (820_454_400_000, 30),   // 1996-01-01
    (867_715_200_000, 31),   // 1997-07-01
    (915_148_800_000, 32),   // 1999-01-01
    (1_136_073_600_000, 33), // 2006-01-01
    (1_230_768_000_000, 34), // 2009-01-01
    (1_341_100_800_000, 35), // 2012-07-01
    (1_435_708_800_000, 36), // 2015-07-01
    (1_483_228_800_000, 37), // 2017-01-01
];

const PRE_1972_OFFSET_MS: i64 = 10_000;

/// TAI-UTC in milliseconds for a UTC instant given in Unix milliseconds.
pub(crate) fn tai_minus_utc_at_utc(unix_millis: i64) -> i64 {
    LEAP_TABLE
        .iter()
        .rev()
        .find(|(start, _)| unix_millis >= *start)
        .map_or(PRE_1972_OFFSET_MS, |(_, secs)| secs * 1000)
}

/// TAI-UTC in milliseconds for an instant given on the TAI scale.
///
/// Inside an inserted leap second the previous offset applies, so the result
/// lands in the first UTC second after the step.
pub(crate) fn tai_minus_utc_at_tai(tai_millis: i64) -> i64 {
    LEAP_TABLE
        .iter()
        .rev()
        .find(|(start, secs)| tai_millis >= start + secs * 1000)
        .map_or(PRE_1972_OFFSET_MS, |(_, secs)| secs * 1000)
}
