use crate::domain::{Category, DiceSet};

pub const FULL_HOUSE_SCORE: u32 = 25;
pub const SMALL_STRAIGHT_SCORE: u32 = 30;
pub const LARGE_STRAIGHT_SCORE: u32 = 40;
pub const YACHT_SCORE: u32 = 50;

const SMALL_STRAIGHTS: [[usize; 4]; 3] = [[1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6]];

pub fn score(dice: &DiceSet, category: Category) -> u32 {
    let counts = dice.counts();
    let most_of_a_kind = counts.iter().copied().max().unwrap_or(0);

    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.face().unwrap_or(0);
            u32::from(counts[face as usize]) * u32::from(face)
        }
        Category::ThreeOfAKind if most_of_a_kind >= 3 => dice.sum(),
        Category::FourOfAKind if most_of_a_kind >= 4 => dice.sum(),
        Category::FullHouse if counts.contains(&3) && counts.contains(&2) => FULL_HOUSE_SCORE,
        Category::SmallStraight
            if SMALL_STRAIGHTS
                .iter()
                .any(|run| run.iter().all(|&face| counts[face] > 0)) =>
        {
            SMALL_STRAIGHT_SCORE
        }
        Category::LargeStraight
            if counts[1..6] == [1u8; 5] || counts[2..7] == [1u8; 5] =>
        {
            LARGE_STRAIGHT_SCORE
        }
        Category::Yacht if most_of_a_kind == 5 => YACHT_SCORE,
        Category::Chance => dice.sum(),
        _ => 0,
    }
}

pub fn score_all(dice: &DiceSet) -> [(Category, u32); Category::COUNT] {
    Category::ALL.map(|category| (category, score(dice, category)))
}

#[cfg(test)]
#[path = "tests/scoring_tests.rs"]
mod tests;
