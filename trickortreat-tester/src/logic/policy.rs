use clap::ValueEnum;
use rand::Rng;
use rand::rngs::SmallRng;
use serde::Serialize;
use trickortreat_game::Choice;

/// Which door the simulated player knocks on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DoorPolicy {
    /// Always pick Treat
    Treat,
    /// Always pick Trick
    Trick,
    /// Treat on even turns, Trick on odd ones
    Alternate,
    /// Coin flip per turn
    Random,
}

/// How the simulated player handles a ghost chase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatchPolicy {
    /// Click the ghost after it has moved a few times
    Always,
    /// Let the countdown run out
    Never,
    /// Coin flip per chase
    Random,
}

impl DoorPolicy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Treat => "treat",
            Self::Trick => "trick",
            Self::Alternate => "alternate",
            Self::Random => "random",
        }
    }

    pub fn choose(self, turn: u8, rng: &mut SmallRng) -> Choice {
        match self {
            Self::Treat => Choice::Treat,
            Self::Trick => Choice::Trick,
            Self::Alternate if turn % 2 == 0 => Choice::Treat,
            Self::Alternate => Choice::Trick,
            Self::Random if rng.gen_bool(0.5) => Choice::Treat,
            Self::Random => Choice::Trick,
        }
    }
}

impl CatchPolicy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Never => "never",
            Self::Random => "random",
        }
    }

    pub fn will_catch(self, rng: &mut SmallRng) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Random => rng.gen_bool(0.5),
        }
    }
}

/// Player behaviour for one batch of sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Policy {
    pub door: DoorPolicy,
    pub catch: CatchPolicy,
    /// Leave for the final screen after this many turns.
    pub stop_after: Option<u8>,
}

impl Policy {
    pub fn label(&self) -> String {
        let mut label = format!("door={} catch={}", self.door.label(), self.catch.label());
        if let Some(turns) = self.stop_after {
            label.push_str(&format!(" stop-after={turns}"));
        }
        label
    }
}

/// Every door and catch policy with its help text, for `--list-policies`.
pub fn list_policies() -> Vec<(String, String)> {
    let doors = DoorPolicy::value_variants().iter().map(|policy| {
        (
            format!("--door {}", policy.label()),
            help_text(policy.to_possible_value()),
        )
    });
    let catches = CatchPolicy::value_variants().iter().map(|policy| {
        (
            format!("--catch {}", policy.label()),
            help_text(policy.to_possible_value()),
        )
    });
    doors.chain(catches).collect()
}

fn help_text(value: Option<clap::builder::PossibleValue>) -> String {
    value
        .and_then(|v| v.get_help().map(ToString::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn alternate_starts_with_treat() {
        let mut rng = SmallRng::seed_from_u64(1);
        let picks: Vec<Choice> = (0..4).map(|t| DoorPolicy::Alternate.choose(t, &mut rng)).collect();
        assert_eq!(
            picks,
            vec![Choice::Treat, Choice::Trick, Choice::Treat, Choice::Trick]
        );
    }

    #[test]
    fn random_door_uses_both_sides() {
        let mut rng = SmallRng::seed_from_u64(9);
        let picks: Vec<Choice> = (0..64).map(|t| DoorPolicy::Random.choose(t, &mut rng)).collect();
        assert!(picks.contains(&Choice::Treat));
        assert!(picks.contains(&Choice::Trick));
    }

    #[test]
    fn fixed_catch_policies_ignore_rng() {
        let mut rng = SmallRng::seed_from_u64(3);
        assert!(CatchPolicy::Always.will_catch(&mut rng));
        assert!(!CatchPolicy::Never.will_catch(&mut rng));
    }

    #[test]
    fn label_mentions_early_stop() {
        let policy = Policy {
            door: DoorPolicy::Trick,
            catch: CatchPolicy::Never,
            stop_after: Some(3),
        };
        assert_eq!(policy.label(), "door=trick catch=never stop-after=3");
    }

    #[test]
    fn listing_covers_every_variant() {
        let listed = list_policies();
        assert_eq!(listed.len(), 7);
        assert!(listed.iter().all(|(_, help)| !help.is_empty()));
    }
}
