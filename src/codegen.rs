//! Human-readable short codes built from an adjective and a noun.

use rand::{seq::SliceRandom, Rng};

pub const DEFAULT_CODE_LENGTH: usize = 6;

const ADJECTIVES: &[&str] = &[
    "fast", "quick", "happy", "smart", "cool", "bright", "calm", "eager", "fresh", "gentle",
    "grand", "great", "honest", "kind", "light", "live", "lucky", "modern", "neat", "nice",
    "noble", "proud", "pure", "quiet", "rapid", "rare", "ready", "rich", "safe", "sharp", "short",
    "simple", "sleek", "smooth", "social", "solid", "sound", "spare", "steady", "swift", "tidy",
    "tiny", "true", "viral", "vivid", "warm", "wise", "witty",
];

const NOUNS: &[&str] = &[
    "arrow", "atlas", "beacon", "beast", "blast", "blaze", "bonus", "boost", "brain", "brand",
    "brave", "brick", "brief", "bright", "bronze", "brush", "build", "burst", "cabin", "cable",
    "cache", "cadet", "candy", "canon", "cargo", "carve", "cedar", "chain", "charm", "chart",
    "chase", "cheer", "chess", "chief", "chime", "chord", "chose", "chunk", "civic", "claim",
    "clamp", "clash", "clean", "clear", "click", "cliff", "climb", "clock", "clone", "close",
    "cloud", "coach", "coast", "coral", "couch", "count", "court", "cover", "crack", "craft",
    "crane", "crash", "crate", "crave", "crazy", "cream", "creek", "crest", "crime", "cross",
    "crowd", "crown", "crude", "crush", "crust", "curve", "cycle", "daily", "dance", "daring",
    "datum", "dealt", "death", "debut", "decade", "decal", "decay", "delay", "delta", "dense",
    "depth", "derby", "design", "detail", "device", "devil", "diary", "diner", "diode", "dirge",
    "dirty", "disco", "ditch", "diver", "dizzy", "dodge", "doing", "doll", "domain", "dome",
    "donor", "doubt", "dough", "draft", "drain", "drama", "drank", "drape", "drawl", "drawn",
    "dream", "dress", "drift", "drill", "drink", "drive", "droid", "drone", "drool", "droop",
    "drown", "drums", "drunk", "dumb", "dunce", "eagle", "earth", "easel", "eater", "ebony",
    "edict", "eight", "eject", "elbow", "elder", "elite", "email", "ember", "embryo", "emerge",
    "emery", "empty", "enact", "enemy", "enjoy", "enter", "entry", "envoy", "epoch", "equal",
    "equip", "erase", "erect", "error", "erupt", "escape", "essay", "ether", "ethic", "evict",
    "evoke", "exact", "exalt", "excel", "exile", "exist", "expat", "extol", "extra", "exude",
    "exult", "fable", "fabric", "faced", "facet", "facts", "faded", "faint", "fairy", "faith",
    "false", "famed", "fancy", "fanny", "farce", "farms", "fatal", "fated", "fatty", "fault",
    "fauna", "favor", "feast", "feats", "fence", "ferns",
];

/// Generates a code of exactly `length` lowercase alphanumeric characters.
///
/// The result is not checked for uniqueness.
pub fn generate_code(length: usize) -> String {
    generate_code_with(&mut rand::thread_rng(), length)
}

/// Same as [`generate_code`] but draws from the given rng.
pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let adjective = ADJECTIVES.choose(rng).copied().unwrap_or_default();
    let noun = NOUNS.choose(rng).copied().unwrap_or_default();

    let mut code: String = adjective.chars().chain(noun.chars()).take(length).collect();
    while code.len() < length {
        let digit = rng.gen_range(0..10u32);
        code.push(char::from_digit(digit, 10).unwrap_or('0'));
    }

    code.to_ascii_lowercase()
}
