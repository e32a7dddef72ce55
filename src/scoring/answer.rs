//! # 문항 채점
//!
//! 선택지 번호(1부터 시작)를 리커트 척도의 배수로 사용합니다.
//! 따라서 선택지는 반드시 "가장 가벼운 증상 → 가장 심한 증상" 순서로 작성되어야 합니다.
//!
//! ## 알려진 특이 동작
//! 점수 계산은 선택지 번호의 범위를 검사하지 않습니다.
//! 0, 음수, 선택지 개수를 넘는 번호도 그대로 곱해져 점수로 기록되지만,
//! 같은 답변의 텍스트는 `answer_label`에서 "invalid option N"으로 저장됩니다.
//! 두 동작은 의도적으로 분리되어 있으며 서로 맞추지 않습니다.

/// 문항 하나의 점수: `선택지 번호 × 문항 가중치`
///
/// 범위 검사 없이 곱합니다. i64 경계에서는 overflow 대신 포화(saturate)합니다.
pub fn score_answer(weight: i64, ordinal: i64) -> i64 {
    ordinal.saturating_mul(weight)
}

/// 선택지 번호에 해당하는 라벨 텍스트를 돌려줍니다.
///
/// 범위 밖이면 `invalid option N`을 돌려주며, 점수에는 영향을 주지 않습니다.
pub fn answer_label(options: &[String], ordinal: i64) -> String {
    usize::try_from(ordinal)
        .ok()
        .filter(|&n| n >= 1)
        .and_then(|n| options.get(n - 1))
        .cloned()
        .unwrap_or_else(|| format!("invalid option {ordinal}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        ["Never", "Sometimes", "Often", "Always"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn score_is_ordinal_times_weight() {
        for weight in [0, 1, 5, 7] {
            for ordinal in -3..=8 {
                assert_eq!(score_answer(weight, ordinal), ordinal * weight);
            }
        }
    }

    #[test]
    fn out_of_range_ordinal_is_still_scored() {
        // 선택지가 4개뿐이어도 9번은 9 × 가중치로 기록됩니다.
        assert_eq!(score_answer(5, 9), 45);
        assert_eq!(score_answer(5, 0), 0);
        assert_eq!(score_answer(5, -2), -10);
    }

    #[test]
    fn label_for_valid_ordinals() {
        let opts = options();
        assert_eq!(answer_label(&opts, 1), "Never");
        assert_eq!(answer_label(&opts, 4), "Always");
    }

    #[test]
    fn label_for_invalid_ordinals() {
        let opts = options();
        assert_eq!(answer_label(&opts, 0), "invalid option 0");
        assert_eq!(answer_label(&opts, 5), "invalid option 5");
        assert_eq!(answer_label(&opts, -1), "invalid option -1");
        assert_eq!(answer_label(&[], 1), "invalid option 1");
    }

    #[test]
    fn invalid_label_and_score_coexist() {
        let opts = options();
        let ordinal = 6;
        assert_eq!(answer_label(&opts, ordinal), "invalid option 6");
        assert_eq!(score_answer(3, ordinal), 18);
    }

    #[test]
    fn extreme_values_saturate() {
        assert_eq!(score_answer(2, i64::MAX), i64::MAX);
        assert_eq!(score_answer(2, i64::MIN), i64::MIN);
    }
}
