//! Word tables shared by the lexicon scorers.
//!
//! Keys are lowercase single words. Multi-word expressions are not matched.

/// Valence on a `[-4.0, 4.0]` scale, used by the compound scorer.
pub(crate) const VALENCE: &[(&str, f64)] = &[
    // Positive
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("brilliant", 2.8),
    ("cool", 1.3),
    ("delightful", 2.9),
    ("easy", 1.9),
    ("enjoy", 2.2),
    ("enjoyed", 2.3),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("fun", 2.3),
    ("glad", 2.0),
    ("good", 1.9),
    ("grateful", 2.0),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("hope", 1.9),
    ("impressive", 2.3),
    ("inspiring", 2.4),
    ("joy", 2.8),
    ("liked", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("ok", 0.9),
    ("okay", 0.9),
    ("perfect", 2.7),
    ("pleased", 1.9),
    ("positive", 2.6),
    ("proud", 2.1),
    ("recommend", 1.5),
    ("satisfied", 1.8),
    ("smile", 1.5),
    ("strong", 2.3),
    ("success", 2.7),
    ("successful", 2.8),
    ("super", 2.9),
    ("sweet", 2.0),
    ("thank", 1.5),
    ("thanks", 1.9),
    ("useful", 1.9),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("worth", 0.9),
    ("wow", 2.8),
    ("yay", 2.4),
    // Negative
    ("angry", -2.3),
    ("annoying", -1.9),
    ("awful", -2.0),
    ("bad", -2.5),
    ("boring", -1.3),
    ("broken", -2.1),
    ("crap", -1.6),
    ("cry", -2.1),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disgusting", -2.4),
    ("dislike", -1.6),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("fake", -1.6),
    ("fear", -2.2),
    ("hate", -2.7),
    ("hated", -3.2),
    ("horrible", -2.5),
    ("hurt", -2.4),
    ("lame", -1.8),
    ("lose", -1.7),
    ("lost", -1.3),
    ("meh", -0.3),
    ("mess", -1.5),
    ("miss", -0.6),
    ("negative", -2.7),
    ("pain", -2.3),
    ("poor", -2.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("ridiculous", -1.5),
    ("sad", -2.1),
    ("scam", -2.3),
    ("scared", -1.9),
    ("sorry", -0.3),
    ("stupid", -2.4),
    ("sucks", -1.5),
    ("terrible", -2.1),
    ("ugly", -3.1),
    ("unhappy", -1.8),
    ("upset", -1.6),
    ("useless", -1.8),
    ("waste", -1.8),
    ("wasted", -2.2),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

/// Degree modifiers for the compound scorer: positive entries boost the
/// following sentiment word, negative entries dampen it.
pub(crate) const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", 0.293),
    ("amazingly", 0.293),
    ("completely", 0.293),
    ("considerably", 0.293),
    ("deeply", 0.293),
    ("especially", 0.293),
    ("extremely", 0.293),
    ("fully", 0.293),
    ("greatly", 0.293),
    ("highly", 0.293),
    ("hugely", 0.293),
    ("incredibly", 0.293),
    ("most", 0.293),
    ("particularly", 0.293),
    ("quite", 0.293),
    ("really", 0.293),
    ("remarkably", 0.293),
    ("so", 0.293),
    ("thoroughly", 0.293),
    ("totally", 0.293),
    ("truly", 0.293),
    ("utterly", 0.293),
    ("very", 0.293),
    ("almost", -0.293),
    ("barely", -0.293),
    ("hardly", -0.293),
    ("less", -0.293),
    ("marginally", -0.293),
    ("occasionally", -0.293),
    ("partly", -0.293),
    ("scarcely", -0.293),
    ("slightly", -0.293),
    ("somewhat", -0.293),
];

/// Polarity on a `[-1.0, 1.0]` scale, used by the averaged scorer.
pub(crate) const POLARITY: &[(&str, f64)] = &[
    // Positive
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("brilliant", 0.9),
    ("cool", 0.35),
    ("delicious", 1.0),
    ("easy", 0.43),
    ("enjoy", 0.4),
    ("excellent", 1.0),
    ("excited", 0.375),
    ("exciting", 0.3),
    ("fantastic", 0.4),
    ("favorite", 0.5),
    ("fine", 0.42),
    ("fresh", 0.3),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("impressive", 1.0),
    ("incredible", 0.9),
    ("interesting", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("ok", 0.5),
    ("okay", 0.5),
    ("perfect", 1.0),
    ("pleasant", 0.73),
    ("positive", 0.23),
    ("proud", 0.8),
    ("super", 0.33),
    ("sweet", 0.35),
    ("useful", 0.3),
    ("wonderful", 1.0),
    // Negative
    ("angry", -0.5),
    ("annoying", -0.8),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("difficult", -0.5),
    ("dirty", -0.6),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("disgusting", -1.0),
    ("dull", -0.3),
    ("expensive", -0.5),
    ("fake", -0.5),
    ("hate", -0.8),
    ("hated", -0.9),
    ("horrible", -1.0),
    ("lame", -0.5),
    ("negative", -0.3),
    ("poor", -0.4),
    ("ridiculous", -0.33),
    ("sad", -0.5),
    ("slow", -0.3),
    ("sorry", -0.5),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("ugly", -0.7),
    ("unhappy", -0.6),
    ("useless", -0.5),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

/// Multipliers applied by the averaged scorer to the next polar word.
pub(crate) const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.4),
    ("extremely", 1.5),
    ("incredibly", 1.4),
    ("quite", 1.1),
    ("really", 1.2),
    ("so", 1.2),
    ("totally", 1.3),
    ("very", 1.3),
];

pub(crate) const NEGATIONS: &[&str] = &[
    "aint", "cannot", "cant", "dont", "isnt", "neither", "never", "no", "nobody", "none", "nor",
    "not", "nothing", "nowhere", "without", "wont",
];

/// `true` for negation words, including any `n't` contraction.
pub(crate) fn is_negation(lower: &str) -> bool {
    lower.ends_with("n't") || NEGATIONS.contains(&lower)
}
