use rand::Rng;
use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::models::Question;

/// Draw `count` distinct questions from the bank in random order.
///
/// Returns fewer than `count` questions when the bank is smaller.
pub fn sample_questions(bank: &[Question], count: usize) -> Vec<Question> {
    sample_questions_with_rng(bank, count, &mut thread_rng())
}

/// Same as [`sample_questions`], drawing from the given random source.
pub fn sample_questions_with_rng<R>(bank: &[Question], count: usize, rng: &mut R) -> Vec<Question>
where
    R: Rng + ?Sized,
{
    let mut shuffled = bank.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}
