use strum::IntoEnumIterator;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum PlanID {
    A,
    B,
}

impl PlanID {
    #[must_use]
    pub fn plan(self) -> &'static WorkoutPlan {
        match self {
            PlanID::A => &PLAN_A,
            PlanID::B => &PLAN_B,
        }
    }
}

/// All plans in display order.
pub fn plans() -> impl Iterator<Item = &'static WorkoutPlan> {
    PlanID::iter().map(PlanID::plan)
}

#[derive(Debug, PartialEq)]
pub struct WorkoutPlan {
    pub id: PlanID,
    pub label: &'static str,
    pub subtitle: &'static str,
    pub tag: &'static str,
    pub color: &'static str,
    pub exercises: &'static [ExerciseDefinition],
}

impl WorkoutPlan {
    #[must_use]
    pub fn exercise(&self, id: &str) -> Option<&'static ExerciseDefinition> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// Distinct muscle groups in the order they are first trained.
    #[must_use]
    pub fn muscle_groups(&self) -> Vec<MuscleGroup> {
        let mut groups = Vec::new();
        for exercise in self.exercises {
            if !groups.contains(&exercise.muscle) {
                groups.push(exercise.muscle);
            }
        }
        groups
    }
}

#[derive(Debug, PartialEq)]
pub struct ExerciseDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub weight: f32,
    pub sets: u32,
    pub reps: u32,
    pub note: &'static str,
    pub muscle: MuscleGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumIter)]
pub enum MuscleGroup {
    Shoulders,
    Chest,
    Triceps,
    Hamstrings,
    Back,
    Legs,
    Biceps,
}

impl MuscleGroup {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MuscleGroup::Shoulders => "HOMBROS",
            MuscleGroup::Chest => "PECHO",
            MuscleGroup::Triceps => "TRÍCEPS",
            MuscleGroup::Hamstrings => "ISQUIOS",
            MuscleGroup::Back => "ESPALDA",
            MuscleGroup::Legs => "PIERNAS",
            MuscleGroup::Biceps => "BÍCEPS",
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            MuscleGroup::Shoulders => "#FF4D1C",
            MuscleGroup::Chest => "#FF6B35",
            MuscleGroup::Triceps => "#FF8C42",
            MuscleGroup::Hamstrings => "#00D4FF",
            MuscleGroup::Back => "#00B8D9",
            MuscleGroup::Legs => "#0099B8",
            MuscleGroup::Biceps => "#007A99",
        }
    }
}

pub static PLAN_A: WorkoutPlan = WorkoutPlan {
    id: PlanID::A,
    label: "DÍA A",
    subtitle: "TORSO & V-SHAPE",
    tag: "Empuje",
    color: "#FF4D1C",
    exercises: &[
        ExerciseDefinition {
            id: "press_hombros",
            name: "Press Hombros",
            weight: 10.0,
            sets: 3,
            reps: 12,
            note: "3s bajada — Control excéntrico",
            muscle: MuscleGroup::Shoulders,
        },
        ExerciseDefinition {
            id: "vuelos_laterales",
            name: "Vuelos Laterales",
            weight: 5.0,
            sets: 4,
            reps: 18,
            note: "Mantener hombros abajo",
            muscle: MuscleGroup::Shoulders,
        },
        ExerciseDefinition {
            id: "press_pecho",
            name: "Press de Pecho",
            weight: 15.0,
            sets: 3,
            reps: 12,
            note: "Codos a 45° — Evitar ardor",
            muscle: MuscleGroup::Chest,
        },
        ExerciseDefinition {
            id: "copa_triceps",
            name: "Copa Tríceps",
            weight: 12.0,
            sets: 3,
            reps: 15,
            note: "Codos cerrados al techo",
            muscle: MuscleGroup::Triceps,
        },
    ],
};

pub static PLAN_B: WorkoutPlan = WorkoutPlan {
    id: PlanID::B,
    label: "DÍA B",
    subtitle: "POTENCIA & BASE",
    tag: "Tracción/Piernas",
    color: "#00D4FF",
    exercises: &[
        ExerciseDefinition {
            id: "peso_muerto",
            name: "Peso Muerto Rumano",
            weight: 18.0,
            sets: 3,
            reps: 12,
            note: "Foco en estirar isquios",
            muscle: MuscleGroup::Hamstrings,
        },
        ExerciseDefinition {
            id: "remo_serrucho",
            name: "Remo (Serrucho)",
            weight: 18.0,
            sets: 3,
            reps: 12,
            note: "Codo al bolsillo",
            muscle: MuscleGroup::Back,
        },
        ExerciseDefinition {
            id: "sentadilla_goblet",
            name: "Sentadilla Goblet",
            weight: 18.0,
            sets: 3,
            reps: 12,
            note: "Romper la paralela",
            muscle: MuscleGroup::Legs,
        },
        ExerciseDefinition {
            id: "curl_martillo",
            name: "Curl Martillo",
            weight: 12.0,
            sets: 3,
            reps: 12,
            note: "Sin balanceo del cuerpo",
            muscle: MuscleGroup::Biceps,
        },
    ],
};
