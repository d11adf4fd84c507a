use serde::{Deserialize, Serialize};

/// Per-hole result relative to par, used for presentation only.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub enum ScoreClass {
    Eagle,
    Birdie,
    Par,
    Bogey,
    Double,
}

impl ScoreClass {
    /// `diff` is strokes minus par.
    #[must_use]
    pub fn from_diff(diff: i32) -> Self {
        match diff {
            i32::MIN..=-2 => Self::Eagle,
            -1 => Self::Birdie,
            0 => Self::Par,
            1 => Self::Bogey,
            _ => Self::Double,
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Eagle => "score-eagle",
            Self::Birdie => "score-birdie",
            Self::Par => "score-par",
            Self::Bogey => "score-bogey",
            Self::Double => "score-double",
        }
    }
}

#[must_use]
pub fn classify(strokes: i32, par: i32) -> ScoreClass {
    ScoreClass::from_diff(strokes - par)
}

/// "Double" for exactly two over, "+N" beyond that.
#[must_use]
pub fn score_label(strokes: i32, par: i32) -> String {
    let diff = strokes - par;
    match diff {
        i32::MIN..=-2 => "Eagle".to_string(),
        -1 => "Birdie".to_string(),
        0 => "Par".to_string(),
        1 => "Bogey".to_string(),
        2 => "Double".to_string(),
        _ => format!("+{diff}"),
    }
}

#[must_use]
pub fn vs_par_label(vs_par: i32) -> String {
    match vs_par {
        0 => "E".to_string(),
        v if v > 0 => format!("+{v}"),
        v => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_the_card() {
        assert_eq!(score_label(2, 5), "Eagle");
        assert_eq!(score_label(3, 4), "Birdie");
        assert_eq!(score_label(4, 4), "Par");
        assert_eq!(score_label(5, 4), "Bogey");
        assert_eq!(score_label(6, 4), "Double");
        assert_eq!(score_label(7, 4), "+3");
    }

    #[test]
    fn double_class_covers_worse_scores() {
        assert_eq!(classify(6, 4), ScoreClass::Double);
        assert_eq!(classify(11, 4), ScoreClass::Double);
        assert_eq!(classify(1, 5), ScoreClass::Eagle);
    }

    #[test]
    fn vs_par_labels() {
        assert_eq!(vs_par_label(0), "E");
        assert_eq!(vs_par_label(3), "+3");
        assert_eq!(vs_par_label(-2), "-2");
    }
}
