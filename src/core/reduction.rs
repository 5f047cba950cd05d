//! Digit-sum reductions shared by every numerology figure.
//!
//! Three families exist and must not be mixed up:
//! - [`reduce_keeping_masters`]: down to 1..=9, stopping early on 11 or 22.
//! - [`reduce_to_archetype_range`]: down to 1..=22, zero mapped to 22.
//! - [`reduce_to_life_path_range`]: down to 1..=9, stopping early on 11, 22 or 33.

const MASTER_NUMBERS: [u32; 2] = [11, 22];
const LIFE_PATH_MASTERS: [u32; 3] = [11, 22, 33];

/// Highest arcana figure.
pub const ARCHETYPE_CEILING: u32 = 22;

/// Sums every ASCII digit in `text`, ignoring everything else.
///
/// `"1990-05-15"` → 30, `"Ana"` → 0.
pub fn digit_sum(text: &str) -> u32 {
    text.chars().filter_map(|c| c.to_digit(10)).sum()
}

/// Sums the decimal digits of `n`.
pub fn sum_of_digits(mut n: u32) -> u32 {
    let mut total = 0;
    while n > 0 {
        total += n % 10;
        n /= 10;
    }
    total
}

/// Reduces to a single digit unless 11 or 22 shows up on the way.
pub fn reduce_keeping_masters(mut n: u32) -> u32 {
    loop {
        if MASTER_NUMBERS.contains(&n) || n <= 9 {
            return n;
        }
        n = sum_of_digits(n);
    }
}

/// Reduces into 1..=22. A result of 0 becomes 22.
///
/// No master exception here: 11 and 22 come out only because they are
/// already within range.
pub fn reduce_to_archetype_range(mut n: u32) -> u32 {
    while n > ARCHETYPE_CEILING {
        n = sum_of_digits(n);
    }
    if n == 0 {
        ARCHETYPE_CEILING
    } else {
        n
    }
}

/// Life-path reduction: masters 11, 22 and 33 are checked after every pass.
pub fn reduce_to_life_path_range(mut n: u32) -> u32 {
    loop {
        if LIFE_PATH_MASTERS.contains(&n) || n <= 9 {
            return n;
        }
        n = sum_of_digits(n);
    }
}

/// Plain reduction to 0..=9, no master numbers.
pub fn reduce_to_single_digit(mut n: u32) -> u32 {
    while n > 9 {
        n = sum_of_digits(n);
    }
    n
}

pub fn is_life_path_value(n: u32) -> bool {
    (1..=9).contains(&n) || LIFE_PATH_MASTERS.contains(&n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_sum_strips_non_digits() {
        assert_eq!(digit_sum("1990-05-15"), 30);
        assert_eq!(digit_sum("14:30"), 8);
        assert_eq!(digit_sum("Ana Souza"), 0);
        assert_eq!(digit_sum(""), 0);
    }

    #[test]
    fn test_reduce_keeping_masters() {
        assert_eq!(reduce_keeping_masters(7), 7);
        assert_eq!(reduce_keeping_masters(11), 11);
        assert_eq!(reduce_keeping_masters(22), 22);
        assert_eq!(reduce_keeping_masters(29), 11);
        assert_eq!(reduce_keeping_masters(30), 3);
        // 993 → 21 → 3, never passing a master
        assert_eq!(reduce_keeping_masters(993), 3);
        // 4 + 9 + 9 = 22, caught on an intermediate pass
        assert_eq!(reduce_keeping_masters(499), 22);
        // 33 is not a master for this family
        assert_eq!(reduce_keeping_masters(33), 6);
    }

    #[test]
    fn test_reduce_to_archetype_range() {
        assert_eq!(reduce_to_archetype_range(0), 22);
        assert_eq!(reduce_to_archetype_range(5), 5);
        assert_eq!(reduce_to_archetype_range(22), 22);
        assert_eq!(reduce_to_archetype_range(23), 5);
        assert_eq!(reduce_to_archetype_range(30), 3);
        assert_eq!(reduce_to_archetype_range(2010), 3);
        // 1999 → 28 → 10
        assert_eq!(reduce_to_archetype_range(1999), 10);
    }

    #[test]
    fn test_reduce_to_life_path_range() {
        assert_eq!(reduce_to_life_path_range(30), 3);
        assert_eq!(reduce_to_life_path_range(29), 11);
        assert_eq!(reduce_to_life_path_range(33), 33);
        assert_eq!(reduce_to_life_path_range(22), 22);
        // 3 + 9 + 9 + 9 = 30 → 3
        assert_eq!(reduce_to_life_path_range(3999), 3);
        // 6 + 9 + 9 + 9 = 33, caught on an intermediate pass
        assert_eq!(reduce_to_life_path_range(6999), 33);
        assert_eq!(reduce_to_life_path_range(44), 8);
    }

    #[test]
    fn test_reduce_to_single_digit_ignores_masters() {
        assert_eq!(reduce_to_single_digit(11), 2);
        assert_eq!(reduce_to_single_digit(22), 4);
        assert_eq!(reduce_to_single_digit(19), 1);
        assert_eq!(reduce_to_single_digit(8), 8);
    }

    #[test]
    fn test_is_life_path_value() {
        assert!(is_life_path_value(1));
        assert!(is_life_path_value(33));
        assert!(!is_life_path_value(0));
        assert!(!is_life_path_value(10));
        assert!(!is_life_path_value(21));
    }
}
