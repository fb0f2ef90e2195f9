//! Curated ambient content
//!
//! One tip and one affirmation are drawn at random for each process
//! action. Fixed lists, no external call, no state.

use rand::seq::IndexedRandom;

/// Productivity tips shown above the input area
pub const TIPS: &[&str] = &[
    "⚡ Starting is the hardest part - aim for just 2 minutes",
    "🧩 Break big tasks into tiny, ridiculously small steps (from 'How to ADHD' by Jessica McCabe)",
    "🔄 Body doubling: work alongside someone (even virtually)",
    "⏰ Time block with timers - work in short bursts",
    "🎯 The 1-3-5 rule: 1 big task, 3 medium tasks, 5 small tasks",
    "🧠 External brain: write EVERYTHING down (from 'Driven to Distraction' by Dr. Hallowell)",
    "🎮 Gamify your tasks - add points, rewards or challenges (from Jane McGonigal's research)",
    "👁️ Make it visible - sticky notes, visual reminders",
    "🌈 Create a dopamine menu - list quick activities that make you happy",
    "🚀 Two-Minute Rule – If it takes less than 2 minutes, do it immediately (from 'Getting Things Done' by David Allen)",
    "📌 Anchor Task – Start your day with one small, grounding task to build momentum",
    "🎧 Soundtrack Your Focus – Use instrumental music or white noise to minimize distractions",
    "🏷️ Label Your Time – Give each block of time a fun or silly name to make it more engaging",
    "🤹 Task Batching – Group similar small tasks together to reduce switching costs",
    "📱 App Jail – Use focus apps to block distracting sites during work sprints",
    "🧳 The Suitcase Method – Visualize packing tasks into 'suitcases' (time blocks) to make them feel more manageable",
    "🛑 Set a 'Worry Time' – Schedule specific time to worry about things (from CBT techniques)",
    "🔄 The 5-4-3-2-1 Trick – Count down from 5 and then just start (from Mel Robbins' '5 Second Rule')",
    "🏆 Completion Celebrations – Reward yourself immediately after finishing a task (from BJ Fogg's Tiny Habits)",
    "💡 Use the 'Forest' app to stay focused while working and grow a virtual tree",
    "🎯 Use the 'Pomodoro Technique' to break work into 25-minute sprints (by Francesco Cirillo)",
];

/// Affirmations shown alongside the tip
pub const AFFIRMATIONS: &[&str] = &[
    "Your brain isn't broken—it's just wired for a world that doesn't exist yet.",
    "That pile of unfinished projects? They're evidence of your boundless curiosity, not your failure.",
    "You notice what others miss, feel what others dismiss, and see connections invisible to many.",
    "The chaos you navigate daily would overwhelm those who judge you most harshly.",
    "Your \"too much\" energy is exactly what this world needs—never apologize for your spark.",
    "The path is harder for you, but the view is more beautiful through your eyes.",
    "For every task you forgot, remember how many brilliant thoughts have crossed your mind.",
    "Your struggle to fit into neurotypical spaces isn't weakness—it's like trying to run underwater.",
    "You're not alone—millions navigate this same invisible current against them every day.",
    "When executive function fails, remember: worth isn't measured by productivity.",
    "Your hyperfocus isn't a flaw—it's your superpower in disguise.",
    "The same brain that loses keys can solve problems others can't even see.",
    "Self-compassion isn't just nice—for you, it's necessary fuel for the journey.",
    "Behind every \"I can't believe I did that again\" is an \"I'm still here, still trying.\"",
    "Your resilience in a world not built for you is nothing short of remarkable.",
    "Time blindness means you live more fully in each moment—a gift and challenge both.",
    "You've developed strength through constant adaptation that most will never understand.",
    "Remember: medication, strategies, and support aren't crutches—they're glasses for your mind.",
    "Your different perspective isn't just valid—it's vital to human progress.",
    "You belong here, exactly as you are—wild, wonderful brain and all.",
    "Hey you, with the 37 browser tabs open and that sinking feeling you're forgetting something important—I see you.",
    "That shame spiral when someone says 'just make a schedule' like you haven't tried a hundred times? I know it well.",
    "The panic of realizing you've been scrolling for two hours when you sat down to 'quickly check something'—you're not alone in this.",
    "That pile of half-finished projects isn't evidence of failure—it's the battlefield where you fight your brain chemistry daily.",
    "I know how it feels when people mistake your time blindness for not caring, when actually you care too much.",
    "You're not crazy for needing noise to focus sometimes and silence other times. Your brain just has its own operating system.",
    "The exhaustion after a day of 'normal' interactions? That's real. Masking drains us in ways others can't see.",
    "Those moments when your thoughts race so fast you can't catch them all—I drop those balls too.",
    "When you apologize for being 'too much'—stop. The world needs your intensity and the connections only you can make.",
    "Those random bursts of motivation aren't character flaws—they're how our engines run. Use them when they come.",
    "Your messy desk, forgotten appointments, and impulsive decisions don't define your worth or intelligence.",
    "Remember how you solved that problem everyone else was stuck on? That's your divergent thinking at work.",
    "When you're beating yourself up for procrastinating again—pause. Our brains require different conditions to launch.",
    "The medicine, sticky notes, and phone alarms aren't signs of weakness—they're tools, like glasses for someone with blurry vision.",
    "You've survived every overwhelming day so far, creating workarounds the neurotypical world will never appreciate enough.",
    "On days when executive function is offline, remember: existing is enough. The dishes can wait.",
    "This lonely road feels less lonely when we walk it together, sharing our maps and shortcuts.",
    "Your beautifully chaotic, creative, struggling, resilient ADHD brain belongs in this world. And you're doing better than you think.",
];

/// Pick a random tip
pub fn random_tip() -> &'static str {
    TIPS.choose(&mut rand::rng()).copied().unwrap_or(TIPS[0])
}

/// Pick a random affirmation
pub fn random_affirmation() -> &'static str {
    AFFIRMATIONS.choose(&mut rand::rng()).copied().unwrap_or(AFFIRMATIONS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_picks_come_from_lists() {
        for _ in 0..20 {
            assert!(TIPS.contains(&random_tip()));
            assert!(AFFIRMATIONS.contains(&random_affirmation()));
        }
    }
}
