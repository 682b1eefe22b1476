//! Best-answer promotion planning.
//!
//! A question has zero or one best answer. [`plan`] takes the current flag
//! state of every answer on a question and works out which rows must change
//! when one answer's promotion is switched. The repository layer applies the
//! plan inside a transaction.

use crate::error::CoreError;
use crate::types::DbId;

/// The `best` flag of a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerFlag {
    pub id: DbId,
    pub best: bool,
}

/// Flag changes produced by switching one answer's promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionPlan {
    /// `target` becomes the best answer; every id in `demote` loses the flag.
    Promote { target: DbId, demote: Vec<DbId> },
    /// `target` was the best answer and loses the flag.
    Demote { target: DbId },
}

impl PromotionPlan {
    pub fn target(&self) -> DbId {
        match self {
            PromotionPlan::Promote { target, .. } | PromotionPlan::Demote { target } => *target,
        }
    }

    /// Whether the target ends up flagged as best.
    pub fn target_is_best(&self) -> bool {
        matches!(self, PromotionPlan::Promote { .. })
    }

    /// Apply the plan to an in-memory flag set.
    #[cfg(test)]
    pub fn apply(&self, answers: &mut [AnswerFlag]) {
        match self {
            PromotionPlan::Promote { target, demote } => {
                for answer in answers.iter_mut() {
                    if answer.id == *target {
                        answer.best = true;
                    } else if demote.contains(&answer.id) {
                        answer.best = false;
                    }
                }
            }
            PromotionPlan::Demote { target } => {
                if let Some(answer) = answers.iter_mut().find(|a| a.id == *target) {
                    answer.best = false;
                }
            }
        }
    }
}

/// Plan the switch of `target`'s promotion among `answers` (all answers of
/// one question).
///
/// Returns [`CoreError::NotFound`] when `target` is not among `answers`.
pub fn plan(target: DbId, answers: &[AnswerFlag]) -> Result<PromotionPlan, CoreError> {
    let current = answers
        .iter()
        .find(|a| a.id == target)
        .ok_or(CoreError::NotFound {
            entity: "Answer",
            id: target,
        })?;

    if current.best {
        return Ok(PromotionPlan::Demote { target });
    }

    let demote = answers
        .iter()
        .filter(|a| a.best && a.id != target)
        .map(|a| a.id)
        .collect();

    Ok(PromotionPlan::Promote { target, demote })
}

/// The id of the best answer, if any.
pub fn best_answer(answers: &[AnswerFlag]) -> Option<DbId> {
    answers.iter().find(|a| a.best).map(|a| a.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn flags(states: &[(DbId, bool)]) -> Vec<AnswerFlag> {
        states
            .iter()
            .map(|&(id, best)| AnswerFlag { id, best })
            .collect()
    }

    fn switch(answers: &mut [AnswerFlag], target: DbId) {
        let plan = plan(target, answers).expect("target must exist");
        plan.apply(answers);
    }

    fn best_count(answers: &[AnswerFlag]) -> usize {
        answers.iter().filter(|a| a.best).count()
    }

    #[test]
    fn promotes_answer_without_previous_best() {
        let answers = flags(&[(1, false), (2, false)]);
        let plan = plan(1, &answers).unwrap();
        assert_eq!(
            plan,
            PromotionPlan::Promote {
                target: 1,
                demote: vec![]
            }
        );
        assert!(plan.target_is_best());
    }

    #[test]
    fn promoting_b_demotes_a() {
        let mut answers = flags(&[(1, true), (2, false)]);
        let plan = plan(2, &answers).unwrap();
        assert_matches!(&plan, PromotionPlan::Promote { target: 2, demote } if demote == &vec![1]);

        plan.apply(&mut answers);
        assert_eq!(best_answer(&answers), Some(2));
        assert!(!answers[0].best);
    }

    #[test]
    fn switching_best_answer_clears_it() {
        let mut answers = flags(&[(1, true), (2, false)]);
        let plan = plan(1, &answers).unwrap();
        assert_eq!(plan, PromotionPlan::Demote { target: 1 });
        assert!(!plan.target_is_best());

        plan.apply(&mut answers);
        assert_eq!(best_answer(&answers), None);
    }

    #[test]
    fn unknown_target_is_not_found() {
        let answers = flags(&[(1, false)]);
        assert_matches!(
            plan(99, &answers),
            Err(CoreError::NotFound { entity: "Answer", id: 99 })
        );
    }

    #[test]
    fn double_switch_restores_original_flag() {
        for initial in [false, true] {
            let mut answers = flags(&[(1, initial), (2, false), (3, false)]);
            switch(&mut answers, 1);
            switch(&mut answers, 1);
            assert_eq!(answers[0].best, initial);
        }
    }

    #[test]
    fn at_most_one_best_after_any_sequence() {
        // Every sequence of up to four switches over three answers.
        let ids: [DbId; 3] = [1, 2, 3];
        let mut sequences: Vec<Vec<DbId>> = Vec::new();
        for len in 1..=4u32 {
            for code in 0..3usize.pow(len) {
                let mut rest = code;
                let mut seq = Vec::with_capacity(len as usize);
                for _ in 0..len {
                    seq.push(ids[rest % 3]);
                    rest /= 3;
                }
                sequences.push(seq);
            }
        }
        assert_eq!(sequences.len(), 3 + 9 + 27 + 81);

        for seq in sequences {
            let mut answers = flags(&[(1, false), (2, false), (3, false)]);
            for &target in &seq {
                switch(&mut answers, target);
                assert!(best_count(&answers) <= 1, "sequence {seq:?} broke the invariant");
            }
            if let Some(&last) = seq.last() {
                // The last switched answer is either the best one or there is none.
                let best = best_answer(&answers);
                assert!(best.is_none() || best == Some(last));
            }
        }
    }

    #[test]
    fn repairs_legacy_state_with_two_best_answers() {
        let mut answers = flags(&[(1, true), (2, true), (3, false)]);
        switch(&mut answers, 3);
        assert_eq!(best_count(&answers), 1);
        assert_eq!(best_answer(&answers), Some(3));
    }
}
