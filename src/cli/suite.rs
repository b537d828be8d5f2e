//! Built-in governance suite registered by the `govprop` binary.
//!
//! Covers quorum arithmetic, motion outcomes, voting eligibility, the role
//! permission matrix and member-name normalization. `majority_passes` is
//! expected to fail: it states a rule the voting model does not guarantee, so
//! `run` always has a counterexample to shrink and report.

use std::sync::Arc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{ Deserialize, Serialize };

use govprop::{
    CheckOutcome,
    EngineConfig,
    EngineResult,
    FnGenerator,
    GeneratorConstraints,
    GeneratorError,
    InvariantCheckResult,
    OneOfGenerator,
    PropertyCategory,
    PropertyEngine,
    PropertyGenerator,
    PropertyInvariant,
    PropertyTest,
    PropertyTestRunner,
    Severity,
    ShrinkMode,
    StringGenerator,
    VecGenerator,
};

const QUORUM_PERCENTAGES: [u32; 4] = [50, 60, 66, 75];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingScenario {
    pub board_size: u32,
    pub present: u32,
    pub votes_for: u32,
    pub votes_against: u32,
    pub quorum_percent: u32,
}

impl MeetingScenario {
    /// Members required for quorum, rounded up
    pub fn required_for_quorum(&self) -> u32 {
        (self.board_size * self.quorum_percent + 99) / 100
    }

    pub fn quorum_met(&self) -> bool {
        self.present * 100 >= self.board_size * self.quorum_percent
    }

    /// A motion carries with quorum and more votes for than against
    pub fn motion_carries(&self) -> bool {
        self.quorum_met() && self.votes_for > self.votes_against
    }

    /// Keep attendance and votes consistent after the board shrinks
    fn clamped(mut self) -> Self {
        self.present = self.present.min(self.board_size);
        self.votes_for = self.votes_for.min(self.present);
        self.votes_against = self.votes_against.min(self.present - self.votes_for);
        self
    }
}

pub struct MeetingGenerator {
    max_board: u32,
}

impl MeetingGenerator {
    pub const ID: &'static str = "meeting_scenario";

    pub fn new(max_board: u32) -> Self {
        Self { max_board }
    }
}

impl PropertyGenerator<MeetingScenario> for MeetingGenerator {
    fn id(&self) -> &str {
        Self::ID
    }

    fn name(&self) -> &str {
        "Board meeting"
    }

    fn type_tag(&self) -> &str {
        "meeting"
    }

    fn generate(&self, rng: &mut StdRng) -> Result<MeetingScenario, GeneratorError> {
        if self.max_board == 0 {
            return Err(GeneratorError::new("board size bound must be positive"));
        }
        let board_size = rng.gen_range(1..=self.max_board);
        let present = rng.gen_range(0..=board_size);
        let votes_for = rng.gen_range(0..=present);
        let votes_against = rng.gen_range(0..=present - votes_for);
        let quorum_percent = *QUORUM_PERCENTAGES.choose(rng).unwrap_or(&50);
        Ok(MeetingScenario { board_size, present, votes_for, votes_against, quorum_percent })
    }

    fn shrink(&self, value: &MeetingScenario, mode: ShrinkMode) -> Option<Vec<MeetingScenario>> {
        let step = |n: u32| -> Vec<u32> {
            match mode {
                ShrinkMode::Minimal => if n > 0 { vec![0] } else { Vec::new() }
                ShrinkMode::Linear => n.checked_sub(1).into_iter().collect(),
                ShrinkMode::Binary => {
                    let mut smaller = Vec::new();
                    if n > 0 {
                        smaller.push(n / 2);
                        if n - 1 != n / 2 {
                            smaller.push(n - 1);
                        }
                    }
                    smaller
                }
            }
        };

        let mut candidates = Vec::new();
        for board_size in step(value.board_size).into_iter().filter(|size| *size > 0) {
            candidates.push(MeetingScenario { board_size, ..value.clone() }.clamped());
        }
        for present in step(value.present) {
            candidates.push(MeetingScenario { present, ..value.clone() }.clamped());
        }
        for votes_for in step(value.votes_for) {
            candidates.push(MeetingScenario { votes_for, ..value.clone() });
        }
        for votes_against in step(value.votes_against) {
            candidates.push(MeetingScenario { votes_against, ..value.clone() });
        }
        if value.quorum_percent != QUORUM_PERCENTAGES[0] {
            candidates.push(MeetingScenario { quorum_percent: QUORUM_PERCENTAGES[0], ..value.clone() });
        }
        Some(candidates)
    }

    fn constraints(&self) -> Option<GeneratorConstraints> {
        Some(GeneratorConstraints {
            range: Some((1.0, self.max_board as f64)),
            custom: Some("votes_for + votes_against <= present <= board_size".to_string()),
            ..GeneratorConstraints::default()
        })
    }

    fn is_edge_case(&self, value: &MeetingScenario) -> bool {
        value.present == value.required_for_quorum() || value.votes_for == value.votes_against
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Observer,
    Member,
    Secretary,
    Chair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadMinutes,
    Vote,
    RecordMinutes,
    CallMeeting,
    CloseMeeting,
}

const ACTIONS: [Action; 5] = [
    Action::ReadMinutes,
    Action::Vote,
    Action::RecordMinutes,
    Action::CallMeeting,
    Action::CloseMeeting,
];

pub fn permitted(role: Role, action: Action) -> bool {
    match action {
        Action::ReadMinutes => true,
        Action::Vote => role >= Role::Member,
        Action::RecordMinutes => role >= Role::Secretary,
        Action::CallMeeting | Action::CloseMeeting => role == Role::Chair,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoterProfile {
    pub role: Role,
    pub recused: bool,
    pub dues_paid: bool,
}

/// Members in good standing may vote unless recused
pub fn eligible_to_vote(voter: &VoterProfile) -> bool {
    permitted(voter.role, Action::Vote) && !voter.recused && voter.dues_paid
}

fn draw_voter(rng: &mut StdRng) -> Result<VoterProfile, GeneratorError> {
    let role = *[Role::Observer, Role::Member, Role::Secretary, Role::Chair]
        .choose(rng)
        .ok_or_else(|| GeneratorError::new("no roles to draw from"))?;
    Ok(VoterProfile { role, recused: rng.gen_bool(0.2), dues_paid: rng.gen_bool(0.9) })
}

/// Trim, collapse inner whitespace and lowercase a member's display name
pub fn normalize_member_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn quorum_test(config: &EngineConfig) -> PropertyTest<MeetingScenario> {
    let invariant = PropertyInvariant::new(
        "Quorum holds exactly when attendance reaches the rounded-up requirement",
        Severity::Critical,
        |meeting: &MeetingScenario| {
            let required = meeting.required_for_quorum();
            Ok(
                CheckOutcome::from_checks(
                    vec![
                        InvariantCheckResult::expect(
                            "quorum_matches_requirement",
                            meeting.quorum_met() == (meeting.present >= required),
                            "percentage rule and member count disagree",
                            Severity::Critical
                        )
                            .with_actual(&meeting.present)
                            .with_constraint(format!(">= {}", required)),
                        InvariantCheckResult::expect(
                            "requirement_within_board",
                            required <= meeting.board_size,
                            "quorum requires more members than the board has",
                            Severity::High
                        )
                            .with_actual(&required)
                            .with_constraint(format!("<= {}", meeting.board_size)),
                    ]
                ).with_output(&meeting.quorum_met())
            )
        }
    ).with_precondition("has_members", |meeting: &MeetingScenario| meeting.board_size > 0);

    PropertyTest::new(
        "quorum_requirement",
        "Quorum requirement",
        PropertyCategory::GovernanceInvariants,
        MeetingGenerator::ID,
        invariant
    )
        .with_config(config.execution_for("quorum_requirement"))
        .with_example(MeetingScenario {
            board_size: 7,
            present: 4,
            votes_for: 3,
            votes_against: 1,
            quorum_percent: 50,
        })
}

fn majority_test(config: &EngineConfig) -> PropertyTest<MeetingScenario> {
    let invariant = PropertyInvariant::new(
        "A carried motion has the support of a majority of the whole board",
        Severity::High,
        |meeting: &MeetingScenario| {
            let carried = meeting.motion_carries();
            Ok(
                CheckOutcome::from_checks(
                    vec![
                        InvariantCheckResult::expect(
                            "absolute_majority",
                            !carried || meeting.votes_for * 2 > meeting.board_size,
                            "motion carried without an absolute majority",
                            Severity::High
                        )
                            .with_actual(&meeting.votes_for)
                            .with_constraint(format!("> {}", meeting.board_size / 2))
                    ]
                ).with_output(&carried)
            )
        }
    ).with_postcondition("outcome_reported", |_, outcome| outcome.output.is_some());

    PropertyTest::new(
        "majority_passes",
        "Majority of board",
        PropertyCategory::BusinessRules,
        MeetingGenerator::ID,
        invariant
    )
        .with_description("Known gap: a simple majority of those present can carry a motion")
        .with_config(config.execution_for("majority_passes"))
        .with_counterexample(MeetingScenario {
            board_size: 4,
            present: 2,
            votes_for: 1,
            votes_against: 0,
            quorum_percent: 50,
        })
}

fn voting_eligibility_test(config: &EngineConfig) -> PropertyTest<VoterProfile> {
    let invariant = PropertyInvariant::new(
        "Only unrecused members in good standing can vote",
        Severity::Critical,
        |voter: &VoterProfile| {
            let eligible = eligible_to_vote(voter);
            Ok(
                CheckOutcome::from_checks(
                    vec![
                        InvariantCheckResult::expect(
                            "observer_excluded",
                            !(eligible && voter.role == Role::Observer),
                            "an observer is eligible to vote",
                            Severity::Critical
                        ),
                        InvariantCheckResult::expect(
                            "recusal_respected",
                            !(eligible && voter.recused),
                            "a recused member is eligible to vote",
                            Severity::Critical
                        ),
                        InvariantCheckResult::expect(
                            "good_standing_required",
                            !(eligible && !voter.dues_paid),
                            "a member with unpaid dues is eligible to vote",
                            Severity::High
                        )
                    ]
                ).with_output(&eligible)
            )
        }
    );

    PropertyTest::new(
        "voting_eligibility",
        "Voting eligibility",
        PropertyCategory::GovernanceInvariants,
        "voter",
        invariant
    ).with_config(config.execution_for("voting_eligibility"))
}

fn permission_test(config: &EngineConfig) -> PropertyTest<Vec<Role>> {
    let invariant = PropertyInvariant::new(
        "Senior roles hold every permission of junior roles",
        Severity::Critical,
        |officers: &Vec<Role>| {
            let mut checks = Vec::new();
            for senior in officers {
                for junior in officers.iter().filter(|junior| *junior < senior) {
                    let missing: Vec<String> = ACTIONS.iter()
                        .filter(|action| permitted(*junior, **action) && !permitted(*senior, **action))
                        .map(|action| format!("{:?}", action))
                        .collect();
                    checks.push(
                        InvariantCheckResult::expect(
                            format!("{:?}_covers_{:?}", senior, junior).to_lowercase(),
                            missing.is_empty(),
                            format!("missing {}", missing.join(", ")),
                            Severity::Critical
                        )
                    );
                }
            }
            checks.push(
                InvariantCheckResult::expect(
                    "observers_cannot_vote",
                    !officers.iter().any(|role| *role == Role::Observer && permitted(*role, Action::Vote)),
                    "an observer was allowed to vote",
                    Severity::Critical
                )
            );
            Ok(CheckOutcome::from_checks(checks))
        }
    );

    PropertyTest::new(
        "permission_matrix",
        "Permission matrix",
        PropertyCategory::SecurityConstraints,
        "officer_roles",
        invariant
    )
        .with_generator("role")
        .with_config(config.execution_for("permission_matrix"))
}

fn name_normalization_test(config: &EngineConfig) -> PropertyTest<String> {
    let invariant = PropertyInvariant::new(
        "Member-name normalization is idempotent",
        Severity::Medium,
        |name: &String| {
            let once = normalize_member_name(name);
            let twice = normalize_member_name(&once);
            Ok(
                CheckOutcome::from_checks(
                    vec![
                        InvariantCheckResult::expect(
                            "idempotent",
                            once == twice,
                            "normalizing twice changed the name",
                            Severity::Medium
                        ).with_actual(&twice),
                        InvariantCheckResult::expect(
                            "no_edge_whitespace",
                            once.trim() == once,
                            "normalized name keeps leading or trailing whitespace",
                            Severity::Low
                        ).with_actual(&once)
                    ]
                ).with_output(&once)
            )
        }
    );

    PropertyTest::new(
        "member_name_normalization",
        "Member name normalization",
        PropertyCategory::DataIntegrity,
        "member_name",
        invariant
    ).with_config(config.execution_for("member_name_normalization"))
}

/// Register the built-in generators and tests with `engine`
pub fn register(engine: &mut PropertyEngine, config: &EngineConfig) -> EngineResult<()> {
    engine.register_generator::<MeetingScenario, _>(MeetingGenerator::new(15));

    let roles = vec![Role::Observer, Role::Member, Role::Secretary, Role::Chair];
    let role: Arc<dyn PropertyGenerator<Role>> = Arc::new(OneOfGenerator::new("role", "role", roles.clone()));
    engine.register_generator::<Role, _>(OneOfGenerator::new("role", "role", roles));
    engine.register_generator::<Vec<Role>, _>(VecGenerator::new("officer_roles", role, 1, 6));
    engine.register_generator::<String, _>(StringGenerator::new("member_name", "abcXYZ  \t", 0, 24));
    engine.register_generator::<VoterProfile, _>(FnGenerator::new("voter", "voter", draw_voter));

    engine.register_test(quorum_test(config))?;
    engine.register_test(majority_test(config))?;
    engine.register_test(voting_eligibility_test(config))?;
    engine.register_test(permission_test(config))?;
    engine.register_test(name_normalization_test(config))?;
    Ok(())
}
