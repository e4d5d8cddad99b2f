// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Built-in workout catalog used to populate an empty `workouts` table.

use crate::models::{NewWorkout, WorkoutType};

pub const WORKOUT_CATALOG: &[NewWorkout] = &[
    NewWorkout {
        name: "Push-ups",
        workout_type: WorkoutType::Home,
        equipment: "None",
        muscles: "Chest, Shoulders, Triceps",
        instructions: "Get in a plank position with hands shoulder-width apart. Lower your body until your chest nearly touches the floor. Push back up to the starting position. Repeat for desired reps.",
    },
    NewWorkout {
        name: "Squats",
        workout_type: WorkoutType::Home,
        equipment: "None",
        muscles: "Quadriceps, Glutes, Hamstrings",
        instructions: "Stand with feet shoulder-width apart. Lower your body by bending your knees and hips. Keep your back straight. Push through your heels to return to starting position.",
    },
    NewWorkout {
        name: "Plank",
        workout_type: WorkoutType::Home,
        equipment: "None",
        muscles: "Core, Shoulders, Back",
        instructions: "Hold a push-up position with forearms on the ground. Keep your body in a straight line. Hold for 20-60 seconds.",
    },
    NewWorkout {
        name: "Lunges",
        workout_type: WorkoutType::Home,
        equipment: "None",
        muscles: "Quadriceps, Glutes, Hamstrings",
        instructions: "Step forward with one leg and lower your hips until both knees are bent at 90 degrees. Push back to starting position and alternate legs.",
    },
    NewWorkout {
        name: "Burpees",
        workout_type: WorkoutType::Home,
        equipment: "None",
        muscles: "Full Body",
        instructions: "Squat down and place hands on ground. Jump back to plank position. Do a push-up. Jump feet back to squat position. Jump up with hands overhead.",
    },
    NewWorkout {
        name: "Mountain Climbers",
        workout_type: WorkoutType::Home,
        equipment: "None",
        muscles: "Core, Shoulders, Legs",
        instructions: "Get in a plank position. Bring one knee towards your chest, then quickly switch legs. Continue alternating at a fast pace.",
    },
    NewWorkout {
        name: "Dumbbell Bench Press",
        workout_type: WorkoutType::Gym,
        equipment: "Dumbbells, Bench",
        muscles: "Chest, Shoulders, Triceps",
        instructions: "Sit on a bench with dumbbells at shoulder height. Press the dumbbells upward until arms are extended. Lower back to starting position.",
    },
    NewWorkout {
        name: "Barbell Deadlift",
        workout_type: WorkoutType::Gym,
        equipment: "Barbell, Weights",
        muscles: "Back, Glutes, Hamstrings, Core",
        instructions: "Stand with feet hip-width apart, barbell in front of shins. Grip the bar and keep it close to your body. Drive through heels to stand up with the bar.",
    },
    NewWorkout {
        name: "Leg Press",
        workout_type: WorkoutType::Gym,
        equipment: "Leg Press Machine",
        muscles: "Quadriceps, Glutes, Hamstrings",
        instructions: "Sit in the machine with feet on the platform. Lower the platform by bending your knees. Push back to starting position.",
    },
    NewWorkout {
        name: "Treadmill Running",
        workout_type: WorkoutType::Gym,
        equipment: "Treadmill",
        muscles: "Cardiovascular, Legs",
        instructions: "Start with a warm-up walk. Gradually increase speed to your desired pace. Maintain steady breathing throughout your run.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_covers_both_locations_with_unique_names() {
        let names: HashSet<_> = WORKOUT_CATALOG.iter().map(|w| w.name).collect();
        assert_eq!(names.len(), WORKOUT_CATALOG.len());

        for workout_type in WorkoutType::ALL {
            assert!(WORKOUT_CATALOG
                .iter()
                .any(|w| w.workout_type == *workout_type));
        }
    }
}
