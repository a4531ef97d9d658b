//! Bucket name candidates for the artifact store

use rand::Rng;

/// Preferred word pool (picked 70% of the time)
pub const ANIMAL_NAMES: &[&str] = &[
    "otter", "falcon", "badger", "heron", "lynx", "marmot", "octopus", "panda", "puffin",
    "raven", "salmon", "tapir", "walrus", "wombat", "yak", "zebra", "beaver", "condor",
    "dolphin", "ferret", "gecko", "ibis", "jackal", "koala", "lemur", "narwhal", "ocelot",
    "pelican", "quokka", "seal",
];

/// Fallback word pool (picked 30% of the time)
pub const FALLBACK_WORDS: &[&str] = &[
    "nimbus", "quartz", "ember", "summit", "harbor", "meadow", "cobalt", "tundra", "canyon",
    "aurora", "basalt", "cedar", "delta", "fjord", "glacier", "lagoon", "mesa", "prairie",
];

const ANIMAL_POOL_BIAS: f64 = 0.7;
const SUFFIX_LEN: usize = 4;
const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate `<word>-bucket-<project>-<suffix>`, normalized to a valid bucket name
pub fn generate_bucket_name(project_id: &str, rng: &mut impl Rng) -> String {
    let pool = if rng.gen_bool(ANIMAL_POOL_BIAS) {
        ANIMAL_NAMES
    } else {
        FALLBACK_WORDS
    };
    let word = pool[rng.gen_range(0..pool.len())];
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect();

    normalize_bucket_name(&format!("{word}-bucket-{project_id}-{suffix}"))
}

/// Lowercase and replace characters GCS rejects with `-`
pub fn normalize_bucket_name(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' | '.' => c,
            'A'..='Z' => c.to_ascii_lowercase(),
            _ => '-',
        })
        .collect()
}
