//! GPA conversion on the 4.0 scale.
//!
//! Points are summed as `f64` and the mean is rounded to two places on its
//! exact binary value, half to even. A mean stored just above 3.825 rounds
//! up to 3.83 and one stored just below 3.675 rounds down to 3.67.

use crate::student::{Grade, Grades};

/// Letter grade -> points. Unknown letters score 0.0.
const LETTER_POINTS: [(&str, f64); 12] = [
    ("A+", 4.0),
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("F", 0.0),
];

/// Lower bound of a 100-point score band -> points, highest band first.
const SCORE_BREAKPOINTS: [(f64, f64); 10] = [
    (93.0, 4.0),
    (90.0, 3.7),
    (87.0, 3.3),
    (83.0, 3.0),
    (80.0, 2.7),
    (77.0, 2.3),
    (73.0, 2.0),
    (70.0, 1.7),
    (67.0, 1.3),
    (63.0, 1.0),
];

/// Points for a letter grade. Matching ignores surrounding whitespace and case.
pub fn letter_points(letter: &str) -> f64 {
    let letter = letter.trim().to_ascii_uppercase();
    LETTER_POINTS
        .iter()
        .find(|(l, _)| *l == letter)
        .map_or(0.0, |(_, points)| *points)
}

/// Points for a 100-point score. NaN and anything below 63 score 0.0.
pub fn score_points(score: f64) -> f64 {
    SCORE_BREAKPOINTS
        .iter()
        .find(|(floor, _)| score >= *floor)
        .map_or(0.0, |(_, points)| *points)
}

/// Points contributed by one grade.
#[inline]
pub fn grade_points(grade: &Grade) -> f64 {
    match grade {
        Grade::Score(score) => score_points(*score),
        Grade::Letter(letter) => letter_points(letter),
    }
}

/// Round to two decimal places, ties to even on the exact stored value.
///
/// Float formatting is exact, so printing at two places and reading the
/// digits back yields the correctly rounded neighbour.
fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Mean points over every graded course, rounded to two places.
///
/// An empty grade map yields exactly 0.0.
pub fn gpa(grades: &Grades) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }

    let total: f64 = grades.values().map(grade_points).sum();
    round2(total / grades.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grades(pairs: &[(&str, Grade)]) -> Grades {
        pairs
            .iter()
            .map(|(c, g)| (c.to_string(), g.clone()))
            .collect()
    }

    #[test]
    fn test_score_breakpoints() {
        let cases = [
            (100.0, 4.0),
            (93.0, 4.0),
            (92.9, 3.7),
            (90.0, 3.7),
            (87.0, 3.3),
            (83.0, 3.0),
            (80.0, 2.7),
            (77.0, 2.3),
            (73.0, 2.0),
            (70.0, 1.7),
            (67.0, 1.3),
            (63.0, 1.0),
            (62.9, 0.0),
            (0.0, 0.0),
        ];
        for (score, expected) in cases {
            assert_eq!(score_points(score), expected, "score {}", score);
        }
        assert_eq!(score_points(f64::NAN), 0.0);
    }

    #[test]
    fn test_letter_table() {
        assert_eq!(letter_points("A+"), letter_points("A"));
        assert_eq!(letter_points("A-"), 3.7);
        assert_eq!(letter_points("B+"), 3.3);
        assert_eq!(letter_points(" b- "), 2.7);
        assert_eq!(letter_points("D+"), 1.3);
        assert_eq!(letter_points("F"), 0.0);
        assert_eq!(letter_points("E"), 0.0);
        assert_eq!(letter_points(""), 0.0);
    }

    #[test]
    fn test_gpa_mixed_numeric() {
        let g = grades(&[("Math", Grade::Score(95.0)), ("Physics", Grade::Score(88.0))]);
        assert_eq!(gpa(&g), 3.65);
    }

    #[test]
    fn test_gpa_letter() {
        let g = grades(&[("Math", Grade::from("B+"))]);
        assert_eq!(gpa(&g), 3.3);
    }

    #[test]
    fn test_gpa_rounds_to_two_places() {
        // (4.0 + 3.7 + 3.3) / 3 = 3.666...
        let g = grades(&[
            ("Math", Grade::from("A")),
            ("Physics", Grade::from("A-")),
            ("Chemistry", Grade::from(88u32)),
        ]);
        assert_eq!(gpa(&g), 3.67);
    }

    #[test]
    fn test_gpa_rounds_stored_midpoints() {
        // (4.0 * 3 + 3.3) / 4 is stored just above 3.825
        let g = grades(&[
            ("Math", Grade::from(93u32)),
            ("Physics", Grade::from(93u32)),
            ("Chemistry", Grade::from(93u32)),
            ("Biology", Grade::from(87u32)),
        ]);
        assert_eq!(gpa(&g), 3.83);

        // 29.4 / 8 is stored just below 3.675
        let g = grades(&[
            ("C1", Grade::from(80u32)),
            ("C2", Grade::from(83u32)),
            ("C3", Grade::from(90u32)),
            ("C4", Grade::from(95u32)),
            ("C5", Grade::from(95u32)),
            ("C6", Grade::from(95u32)),
            ("C7", Grade::from(95u32)),
            ("C8", Grade::from(95u32)),
        ]);
        assert_eq!(gpa(&g), 3.67);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.666_666), 3.67);
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
    }

    #[test]
    fn test_gpa_unknown_letter_counts_as_zero() {
        let g = grades(&[("Math", Grade::from("A")), ("Art", Grade::from("Pass"))]);
        assert_eq!(gpa(&g), 2.0);
    }

    #[test]
    fn test_gpa_empty() {
        assert_eq!(gpa(&Grades::new()), 0.0);
    }
}
