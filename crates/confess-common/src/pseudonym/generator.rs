//! Random pseudonym candidates
//!
//! Produces names of the shape `<Color><Animal><Number>`, e.g.
//! "CrimsonOtter731". Candidates are not guaranteed unique; the identity
//! service checks storage and regenerates on collision.

use rand::Rng;

/// Inclusive lower bound of the numeric suffix
pub const NUMBER_MIN: u32 = 100;
/// Inclusive upper bound of the numeric suffix
pub const NUMBER_MAX: u32 = 9999;

const COLORS: &[&str] = &[
    "Amber", "Azure", "Beige", "Bronze", "Cherry", "Cobalt", "Copper", "Coral", "Crimson", "Cyan",
    "Ebony", "Emerald", "Fuchsia", "Golden", "Indigo", "Ivory", "Jade", "Lavender", "Lime",
    "Magenta", "Maroon", "Mauve", "Mint", "Ochre", "Olive", "Onyx", "Pearl", "Plum", "Rose",
    "Ruby", "Rust", "Sable", "Saffron", "Sage", "Salmon", "Scarlet", "Sepia", "Silver", "Slate",
    "Teal", "Topaz", "Umber", "Violet",
];

const ANIMALS: &[&str] = &[
    "Badger", "Bat", "Bear", "Beaver", "Bison", "Crane", "Crow", "Deer", "Dingo", "Dove",
    "Falcon", "Ferret", "Finch", "Fox", "Gecko", "Hare", "Hawk", "Heron", "Ibis", "Jackal",
    "Koala", "Lemur", "Llama", "Lynx", "Magpie", "Marten", "Mole", "Moose", "Newt", "Ocelot",
    "Otter", "Owl", "Panda", "Puffin", "Quail", "Raven", "Robin", "Seal", "Shrew", "Sparrow",
    "Stoat", "Swan", "Tapir", "Toucan", "Viper", "Walrus", "Weasel", "Wolf", "Wombat", "Wren",
];

/// Generate one pseudonym candidate
#[must_use]
pub fn generate_pseudonym() -> String {
    let mut rng = rand::thread_rng();
    let color = COLORS[rng.gen_range(0..COLORS.len())];
    let animal = ANIMALS[rng.gen_range(0..ANIMALS.len())];
    let number = rng.gen_range(NUMBER_MIN..=NUMBER_MAX);

    format!("{color}{animal}{number}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pseudonym_shape() {
        for _ in 0..100 {
            let name = generate_pseudonym();
            // Two capitalized words followed by the number suffix
            let digits: String = name.chars().filter(char::is_ascii_digit).collect();
            let number: u32 = digits.parse().unwrap();
            assert!((NUMBER_MIN..=NUMBER_MAX).contains(&number), "{name}");
            assert!(name.chars().next().unwrap().is_ascii_uppercase());
            assert!(name.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_pseudonyms_vary() {
        let names: std::collections::HashSet<_> =
            (0..50).map(|_| generate_pseudonym()).collect();
        // Collisions are possible but 50 identical draws are not
        assert!(names.len() > 1);
    }
}
