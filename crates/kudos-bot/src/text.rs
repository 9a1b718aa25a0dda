// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text transforms for the echo commands.

use rand::Rng;
use rand::seq::SliceRandom;

const UWU_FACES: &[&str] = &[" owo", " uwu", " :3"];

pub fn shout(text: &str) -> String {
    text.to_uppercase()
}

/// Randomly upper- or lower-cases each character.
pub fn mock<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    text.chars()
        .flat_map(|c| {
            if rng.gen_bool(0.5) {
                c.to_uppercase().collect::<Vec<_>>()
            } else {
                c.to_lowercase().collect::<Vec<_>>()
            }
        })
        .collect()
}

/// `r`/`l` become `w`, `o` after `m`/`n` gains a `y`, and a face is appended.
pub fn uwu<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut prev = None;
    for c in text.chars() {
        match c {
            'R' | 'L' => out.push('W'),
            'r' | 'l' => out.push('w'),
            'o' | 'O' if matches!(prev, Some('m' | 'M' | 'n' | 'N')) => {
                out.push('y');
                out.push(c);
            }
            _ => out.push(c),
        }
        prev = Some(c);
    }
    if let Some(face) = UWU_FACES.choose(rng) {
        out.push_str(face);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn mock_only_changes_case() {
        let mut rng = StdRng::seed_from_u64(1);
        let mocked = mock("hello world", &mut rng);
        assert_eq!(mocked.to_lowercase(), "hello world");
    }

    #[test]
    fn uwu_rewrites_letters_and_adds_face() {
        let mut rng = StdRng::seed_from_u64(2);
        let out = uwu("Really no more", &mut rng);
        assert!(out.starts_with("Weawwy nyo myowe"), "{out}");
        assert!(UWU_FACES.iter().any(|f| out.ends_with(f)));
    }
}
