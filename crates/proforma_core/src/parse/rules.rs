//! Topic rule table and text-matching primitives for the scenario parser.
//!
//! Rules are evaluated in order over the lowercased input; they are not
//! mutually exclusive, and a later rule overwrites any lever a former rule
//! already touched. Keyword tests are substring matches; direction words
//! are matched as token prefixes so that "downturn" does not read as
//! "down" and "increase" does not read as "ease".

use std::sync::LazyLock;

use regex::Regex;

use crate::model::LeverId;
use crate::scenario::LeverValues;

/// A bare "N%" anywhere in the text wins over everything else.
static BARE_PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").expect("pattern compiles"));

/// Keyword-anchored magnitudes, tried when no bare percent is present.
static ANCHORED_MAGNITUDES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:by|to|of|at|around|about)\s+(\d+(?:\.\d+)?)",
        r"(\d+(?:\.\d+)?)\s*(?:percent|percentage\s+points?|pct|points?|pp)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("pattern compiles"))
    .collect()
});

/// Any number at all, used only by the generic fallback tier.
static ANY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)").expect("pattern compiles"));

fn first_capture(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Extract a percentage magnitude: bare "N%" first, then anchored patterns.
pub(crate) fn extract_magnitude(text: &str) -> Option<f64> {
    if let Some(value) = first_capture(&BARE_PERCENT, text) {
        return Some(value);
    }
    ANCHORED_MAGNITUDES
        .iter()
        .find_map(|re| first_capture(re, text))
}

/// Loosest tier: the first number anywhere in the text.
pub(crate) fn extract_any_number(text: &str) -> Option<f64> {
    extract_magnitude(text).or_else(|| first_capture(&ANY_NUMBER, text))
}

const INCREASE_STEMS: &[&str] = &[
    "increas", "rise", "rising", "rose", "grow", "surg", "spik", "jump", "escalat", "hik",
    "boost", "gain", "improv", "strengthen", "expand", "accelerat", "climb", "higher",
];
const INCREASE_EXACT: &[&str] = &["up"];

const DECREASE_STEMS: &[&str] = &[
    "decreas", "drop", "fall", "fell", "lower", "declin", "cut", "reduc", "shrink", "slump",
    "plung", "weaken", "slash", "soften", "cool", "erod", "worsen",
];
const DECREASE_EXACT: &[&str] = &["down"];

pub(crate) fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Shared direction vocabulary. Decrease wins when both appear.
pub(crate) fn direction_from_vocab(words: &[&str]) -> Option<f64> {
    let hit = |stems: &[&str], exact: &[&str]| {
        words.iter().any(|w| {
            stems.iter().any(|s| w.starts_with(s)) || exact.iter().any(|e| w == e)
        })
    };
    if hit(DECREASE_STEMS, DECREASE_EXACT) {
        return Some(-1.0);
    }
    if hit(INCREASE_STEMS, INCREASE_EXACT) {
        return Some(1.0);
    }
    None
}

/// How a rule resolves the sign of its magnitude.
pub(crate) enum DirectionPolicy {
    /// Shared vocabulary first, then the rule's own cues, then a fallback
    /// sign. Cues fire on meaning, not grammar: "competitor" reads as a
    /// share loss even with no decrease word nearby.
    Vocab {
        negative_cues: &'static [&'static str],
        positive_cues: &'static [&'static str],
        fallback: f64,
    },
    /// Magnitude-only topics whose sign structure lives in the applier
    /// (recession, price war and the like).
    Fixed(f64),
}

pub(crate) struct TopicRule {
    pub keywords: &'static [&'static str],
    pub default_magnitude: f64,
    pub direction: DirectionPolicy,
    /// Applies the signed magnitude to the mapping and returns an
    /// explanation fragment. Values go through `LeverValues::set`, so they
    /// come back clamped.
    pub apply: fn(f64, &mut LeverValues) -> String,
}

impl TopicRule {
    pub(crate) fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k))
    }

    pub(crate) fn direction(&self, text: &str, words: &[&str]) -> f64 {
        match &self.direction {
            DirectionPolicy::Fixed(sign) => *sign,
            DirectionPolicy::Vocab {
                negative_cues,
                positive_cues,
                fallback,
            } => {
                if let Some(sign) = direction_from_vocab(words) {
                    return sign;
                }
                if negative_cues.iter().any(|c| text.contains(c)) {
                    return -1.0;
                }
                if positive_cues.iter().any(|c| text.contains(c)) {
                    return 1.0;
                }
                *fallback
            }
        }
    }
}

fn apply_tariffs(s: f64, levers: &mut LeverValues) -> String {
    let tariffs = levers.set(LeverId::Tariffs, s);
    let share = levers.set(LeverId::MarketShare, -0.08 * s);
    let price = levers.set(LeverId::PriceChange, 0.12 * s);
    let material = levers.set(LeverId::MaterialInflation, 0.08 * s);
    format!(
        "tariffs at {tariffs:+.0}% with pass-through pricing ({price:+.1}%), \
         costlier sourcing ({material:+.1}%) and share pressure ({share:+.1}%)"
    )
}

fn apply_market_share(s: f64, levers: &mut LeverValues) -> String {
    let share = levers.set(LeverId::MarketShare, s);
    format!("market share shifting {share:+.1}%")
}

fn apply_demand(s: f64, levers: &mut LeverValues) -> String {
    let volume = levers.set(LeverId::VolumeGrowth, s);
    format!("market demand moving volumes {volume:+.1}%")
}

fn apply_volume(s: f64, levers: &mut LeverValues) -> String {
    let volume = levers.set(LeverId::VolumeGrowth, s);
    format!("unit volumes {volume:+.1}%")
}

fn apply_pricing(s: f64, levers: &mut LeverValues) -> String {
    let price = levers.set(LeverId::PriceChange, s);
    format!("average pricing {price:+.1}%")
}

fn apply_materials(s: f64, levers: &mut LeverValues) -> String {
    let material = levers.set(LeverId::MaterialInflation, s);
    format!("material costs {material:+.1}%")
}

fn apply_supply_chain(s: f64, levers: &mut LeverValues) -> String {
    let supply = levers.set(LeverId::SupplyChain, s);
    format!("supply chain efficiency {supply:+.1}%")
}

fn apply_labor(s: f64, levers: &mut LeverValues) -> String {
    let productivity = levers.set(LeverId::LaborProductivity, s);
    format!("labor productivity {productivity:+.1}%")
}

fn apply_warranty(s: f64, levers: &mut LeverValues) -> String {
    let warranty = levers.set(LeverId::WarrantyCosts, s);
    format!("warranty costs {warranty:+.1}%")
}

fn apply_marketing(s: f64, levers: &mut LeverValues) -> String {
    let spend = levers.set(LeverId::MarketingSpend, s);
    format!("marketing spend {spend:+.1}%")
}

fn apply_interest_rates(s: f64, levers: &mut LeverValues) -> String {
    let rates = levers.set(LeverId::InterestRates, s);
    format!("interest rates {rates:+.1}%")
}

fn apply_fx(s: f64, levers: &mut LeverValues) -> String {
    let fx = levers.set(LeverId::FxRate, s);
    format!("FX moving {fx:+.1}%")
}

fn apply_recession(s: f64, levers: &mut LeverValues) -> String {
    let volume = levers.set(LeverId::VolumeGrowth, -0.8 * s);
    let price = levers.set(LeverId::PriceChange, -0.3 * s);
    let share = levers.set(LeverId::MarketShare, -0.1 * s);
    format!(
        "recession conditions: volumes {volume:+.1}%, pricing {price:+.1}%, \
         share {share:+.1}%"
    )
}

fn apply_growth(s: f64, levers: &mut LeverValues) -> String {
    let volume = levers.set(LeverId::VolumeGrowth, 0.7 * s);
    let share = levers.set(LeverId::MarketShare, 0.2 * s);
    let price = levers.set(LeverId::PriceChange, 0.1 * s);
    format!(
        "economic expansion: volumes {volume:+.1}%, share {share:+.1}%, \
         pricing {price:+.1}%"
    )
}

fn apply_inflation(s: f64, levers: &mut LeverValues) -> String {
    let material = levers.set(LeverId::MaterialInflation, 0.8 * s);
    let price = levers.set(LeverId::PriceChange, 0.4 * s);
    format!(
        "inflation feeding input costs ({material:+.1}%) with partial price \
         pass-through ({price:+.1}%)"
    )
}

fn apply_new_product(s: f64, levers: &mut LeverValues) -> String {
    let volume = levers.set(LeverId::VolumeGrowth, 0.6 * s);
    let share = levers.set(LeverId::MarketShare, 0.15 * s);
    let spend = levers.set(LeverId::MarketingSpend, 0.4 * s);
    format!(
        "product launch lifting volumes ({volume:+.1}%) and share \
         ({share:+.1}%) on extra marketing ({spend:+.1}%)"
    )
}

fn apply_price_war(s: f64, levers: &mut LeverValues) -> String {
    let price = levers.set(LeverId::PriceChange, -0.8 * s);
    let volume = levers.set(LeverId::VolumeGrowth, 0.25 * s);
    let spend = levers.set(LeverId::MarketingSpend, 0.25 * s);
    format!(
        "price war: pricing {price:+.1}% for volume {volume:+.1}% at higher \
         marketing ({spend:+.1}%)"
    )
}

fn apply_fuel(s: f64, levers: &mut LeverValues) -> String {
    let volume = levers.set(LeverId::VolumeGrowth, -0.2 * s);
    let material = levers.set(LeverId::MaterialInflation, 0.15 * s);
    format!(
        "fuel prices shifting demand ({volume:+.1}% volume) and input costs \
         ({material:+.1}%)"
    )
}

fn apply_regulatory(s: f64, levers: &mut LeverValues) -> String {
    let material = levers.set(LeverId::MaterialInflation, 0.3 * s);
    let productivity = levers.set(LeverId::LaborProductivity, -0.2 * s);
    format!(
        "regulatory burden on input costs ({material:+.1}%) and \
         productivity ({productivity:+.1}%)"
    )
}

fn apply_capacity(s: f64, levers: &mut LeverValues) -> String {
    let volume = levers.set(LeverId::VolumeGrowth, 0.5 * s);
    let productivity = levers.set(LeverId::LaborProductivity, 0.2 * s);
    format!(
        "capacity change moving volumes {volume:+.1}% and productivity \
         {productivity:+.1}%"
    )
}

fn apply_seasonal(s: f64, levers: &mut LeverValues) -> String {
    let volume = levers.set(LeverId::VolumeGrowth, 0.6 * s);
    let spend = levers.set(LeverId::MarketingSpend, 0.3 * s);
    format!("seasonal swing: volumes {volume:+.1}%, marketing {spend:+.1}%")
}

/// All topic rules in evaluation order.
pub(crate) const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        keywords: &["tariff", "duty", "duties", "trade war", "import tax", "customs"],
        default_magnitude: 10.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &["remove", "lift", "repeal", "roll back", "suspend"],
            positive_cues: &[],
            fallback: 1.0,
        },
        apply: apply_tariffs,
    },
    TopicRule {
        keywords: &["market share", "share gain", "share loss", "competitor", "competition", "rival"],
        default_magnitude: 2.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &["competitor", "competition", "rival", "loss", "lose", "losing"],
            positive_cues: &[],
            fallback: 1.0,
        },
        apply: apply_market_share,
    },
    TopicRule {
        keywords: &["demand", "consumer confidence", "appetite", "buyer interest"],
        default_magnitude: 5.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &["soft", "weak", "slump"],
            positive_cues: &["strong", "robust"],
            fallback: 1.0,
        },
        apply: apply_demand,
    },
    TopicRule {
        keywords: &["volume", "units", "production output", "deliveries"],
        default_magnitude: 5.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &[],
            positive_cues: &[],
            fallback: 1.0,
        },
        apply: apply_volume,
    },
    TopicRule {
        keywords: &["price", "pricing", "msrp", "sticker"],
        default_magnitude: 3.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &["discount", "markdown", "undercut"],
            positive_cues: &["premium"],
            fallback: 1.0,
        },
        apply: apply_pricing,
    },
    TopicRule {
        keywords: &["material", "steel", "aluminum", "commodity", "lithium", "battery"],
        default_magnitude: 5.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &[],
            positive_cues: &["inflat", "expensive"],
            fallback: 1.0,
        },
        apply: apply_materials,
    },
    TopicRule {
        keywords: &["supply chain", "supplier", "logistics", "shipping", "chip shortage", "semiconductor"],
        default_magnitude: 10.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &["disruption", "shortage", "crisis", "bottleneck", "delay", "issue", "problem"],
            positive_cues: &["resilien", "smooth"],
            fallback: -1.0,
        },
        apply: apply_supply_chain,
    },
    TopicRule {
        keywords: &["labor", "labour", "workforce", "wage", "strike", "union", "productivity", "headcount"],
        default_magnitude: 5.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &["strike", "walkout", "shortage", "absenteeism", "turnover"],
            positive_cues: &["automation", "efficien"],
            fallback: 1.0,
        },
        apply: apply_labor,
    },
    TopicRule {
        keywords: &["warranty", "recall", "defect", "quality issue"],
        default_magnitude: 10.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &[],
            positive_cues: &["recall", "defect", "claim"],
            fallback: 1.0,
        },
        apply: apply_warranty,
    },
    TopicRule {
        keywords: &["marketing", "advertis", "ad spend", "promotion", "campaign"],
        default_magnitude: 10.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &[],
            positive_cues: &[],
            fallback: 1.0,
        },
        apply: apply_marketing,
    },
    TopicRule {
        keywords: &["interest rate", "rate hike", "rate cut", "borrowing cost", "financing cost"],
        default_magnitude: 2.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &[],
            positive_cues: &["tighten"],
            fallback: 1.0,
        },
        apply: apply_interest_rates,
    },
    TopicRule {
        keywords: &["fx", "exchange rate", "currency", "dollar", "euro", "yen"],
        default_magnitude: 5.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &["depreciat", "devalu"],
            positive_cues: &["appreciat"],
            fallback: 1.0,
        },
        apply: apply_fx,
    },
    TopicRule {
        keywords: &["recession", "downturn", "contraction", "hard landing", "stagflation"],
        default_magnitude: 10.0,
        direction: DirectionPolicy::Fixed(1.0),
        apply: apply_recession,
    },
    TopicRule {
        keywords: &["economic growth", "boom", "expansion", "recovery", "rebound", "upturn", "strong economy"],
        default_magnitude: 5.0,
        direction: DirectionPolicy::Fixed(1.0),
        apply: apply_growth,
    },
    TopicRule {
        keywords: &["inflation", "cpi", "cost pressure"],
        default_magnitude: 4.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &["disinflation", "deflation"],
            positive_cues: &[],
            fallback: 1.0,
        },
        apply: apply_inflation,
    },
    TopicRule {
        keywords: &["new product", "launch", "new model", "facelift", "lineup"],
        default_magnitude: 5.0,
        direction: DirectionPolicy::Fixed(1.0),
        apply: apply_new_product,
    },
    TopicRule {
        keywords: &["price war", "aggressive pricing", "discount war", "race to the bottom"],
        default_magnitude: 8.0,
        direction: DirectionPolicy::Fixed(1.0),
        apply: apply_price_war,
    },
    TopicRule {
        keywords: &["fuel", "gas price", "gasoline", "diesel", "oil price", "crude"],
        default_magnitude: 10.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &[],
            positive_cues: &[],
            fallback: 1.0,
        },
        apply: apply_fuel,
    },
    TopicRule {
        keywords: &["regulat", "emission", "compliance", "mandate", "epa"],
        default_magnitude: 5.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &["deregulat", "relax", "roll back", "repeal"],
            positive_cues: &["stricter", "tighten"],
            fallback: 1.0,
        },
        apply: apply_regulatory,
    },
    TopicRule {
        keywords: &["capacity", "plant", "factory", "assembly", "shutdown"],
        default_magnitude: 10.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &["shutdown", "closure", "idle", "offline", "outage", "strike", "halt"],
            positive_cues: &["ramp", "add"],
            fallback: 1.0,
        },
        apply: apply_capacity,
    },
    TopicRule {
        keywords: &["seasonal", "seasonality", "q4", "holiday", "year-end", "off-season"],
        default_magnitude: 3.0,
        direction: DirectionPolicy::Vocab {
            negative_cues: &["slowdown", "lull", "off-season"],
            positive_cues: &["peak"],
            fallback: 1.0,
        },
        apply: apply_seasonal,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_percent_wins_over_anchors() {
        assert_eq!(extract_magnitude("tariffs rise by 5 to reach 25%"), Some(25.0));
        assert_eq!(extract_magnitude("volumes fall by 12"), Some(12.0));
        assert_eq!(extract_magnitude("about 7.5 points of share"), Some(7.5));
        assert_eq!(extract_magnitude("no numbers here"), None);
    }

    #[test]
    fn test_any_number_is_the_loosest_tier() {
        assert_eq!(extract_any_number("revenue headwind of maybe 300"), Some(300.0));
        assert_eq!(extract_any_number("nothing quantified"), None);
    }

    #[test]
    fn test_direction_token_prefixes_avoid_substring_traps() {
        // "increase" must not read as the decrease stem "ease"
        let words = tokenize("tariffs increase sharply");
        assert_eq!(direction_from_vocab(&words), Some(1.0));
        // "downturn" is a topic word, not the direction token "down"
        let words = tokenize("a downturn looms");
        assert_eq!(direction_from_vocab(&words), None);
        // bare "down" still works
        let words = tokenize("volumes are down");
        assert_eq!(direction_from_vocab(&words), Some(-1.0));
    }

    #[test]
    fn test_decrease_wins_mixed_signals() {
        let words = tokenize("growing costs cut margins");
        assert_eq!(direction_from_vocab(&words), Some(-1.0));
    }
}
