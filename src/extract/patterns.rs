use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// The pattern library is data, not branching: each category key maps to an
/// ordered list of attraction matchers, with a small generic fallback for
/// categories that have no dedicated list. Category lists are curated per
/// category because generic terms alone under- or over-match ("lane" means
/// something for bowling and axe throwing, noise elsewhere).
///
/// All patterns are case-insensitive and tolerate plural and hyphen/space
/// variants.
fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", p)).expect("pattern must compile"))
        .collect()
}

static CATEGORY_ATTRACTIONS: Lazy<HashMap<&'static str, Vec<Regex>>> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(
        "trampoline",
        compile(&[
            r"main\s+(?:bounce\s+)?court(?:s)?",
            r"foam\s+pit(?:s)?",
            r"dodgeball\s+(?:court|area)(?:s)?",
            r"basketball\s+(?:hoop|area)(?:s)?",
            r"battle\s+beam(?:s)?",
            r"ninja\s+course(?:s)?",
            r"wipeout\s+zone",
            r"slam\s+dunk(?:\s+area)?",
            r"air\s+bag(?:s)?",
            r"performance\s+trampoline(?:s)?",
            r"toddler\s+area",
        ]),
    );

    table.insert(
        "bowling",
        compile(&[
            r"(?:\d+\s*)?(?:pin\s+)?bowling\s+lane(?:s)?",
            r"ten\s*pin\s*bowling",
            r"cosmic\s+bowling",
            r"glow\s+bowling",
            r"bumper\s+bowling",
            r"kids\s+bowling",
        ]),
    );

    table.insert(
        "karting",
        compile(&[
            r"indoor\s+(?:go\s+)?kart(?:ing)?(?:\s+track)?",
            r"outdoor\s+(?:go\s+)?kart(?:ing)?(?:\s+track)?",
            r"electric\s+kart(?:s)?",
            r"petrol\s+kart(?:s)?",
            r"junior\s+kart(?:ing|s)?",
            r"adult\s+kart(?:ing|s)?",
            r"racing\s+simulation",
        ]),
    );

    table.insert(
        "climbing",
        compile(&[
            r"bouldering\s+(?:wall|area)(?:s)?",
            r"top\s+rope\s+climbing",
            r"lead\s+climbing",
            r"auto\s+belay(?:s)?",
            r"speed\s+climbing",
            r"training\s+(?:wall|area)",
            r"competition\s+(?:wall|area)",
        ]),
    );

    table.insert(
        "laser_tag",
        compile(&[
            r"laser\s+tag\s+arena(?:s)?",
            r"multi[\s-]?level\s+arena",
            r"outdoor\s+laser(?:\s+tag)?",
            r"indoor\s+laser(?:\s+tag)?",
            r"tactical\s+laser",
            r"team\s+battles?",
        ]),
    );

    table.insert(
        "escape_rooms",
        compile(&[
            r"escape\s+room(?:s)?(?:\s+theme(?:s)?)?",
            r"horror\s+escape(?:\s+room)?",
            r"mystery\s+room(?:s)?",
            r"puzzle\s+room(?:s)?",
            r"adventure\s+room(?:s)?",
            r"themed\s+room(?:s)?",
        ]),
    );

    table.insert(
        "vr_arcade",
        compile(&[
            r"vr\s+(?:experience|game)(?:s)?",
            r"virtual\s+reality\s+game(?:s)?",
            r"multiplayer\s+vr",
            r"vr\s+escape(?:\s+room)?",
            r"vr\s+zombie(?:s)?",
            r"vr\s+racing",
            r"vr\s+shooting",
        ]),
    );

    table.insert(
        "axe_throwing",
        compile(&[
            r"axe\s+throwing\s+lane(?:s)?",
            r"hatchet\s+throwing",
            r"tomahawk\s+throwing",
            r"knife\s+throwing",
        ]),
    );

    table
});

/// Fallback attraction matchers for categories without a dedicated list.
static GENERIC_ATTRACTIONS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"main\s+(?:activity|attraction)",
        r"group\s+activities",
        r"party\s+(?:room|area)(?:s)?",
    ])
});

/// Facility matchers appended to every category's attraction scan.
static COMMON_FACILITIES: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"birthday\s+part(?:y|ies)",
        r"group\s+booking(?:s)?",
        r"corporate\s+event(?:s)?",
        r"team\s+building",
        r"private\s+hire",
        r"party\s+package(?:s)?",
        r"food\s+(?:and\s+drink|court|area)",
        r"cafe(?:teria)?",
        r"restaurant",
        r"bar(?:\s+area)?",
        r"spectator\s+area(?:s)?",
        r"viewing\s+area(?:s)?",
        r"retail\s+(?:shop|store)",
        r"pro\s+shop",
        r"equipment\s+hire",
        r"locker(?:s)?",
        r"changing\s+room(?:s)?",
        r"parking(?:\s+available)?",
        r"disabled\s+access",
        r"wheelchair\s+accessible",
    ])
});

static AGE_GROUPS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"all\s+ages?",
        r"family\s+friendly",
        r"(?:kids?|children)\s+welcome",
        r"adults?\s+only",
        r"18\+",
        r"under\s+\d+(?:s)?",
        r"\d+\s*years?\s*(?:and\s*)?(?:over|up)",
        r"junior\s+session(?:s)?",
        r"adult\s+session(?:s)?",
        r"toddler(?:s)?",
        r"teenager(?:s)?",
    ])
});

static PRICING: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"£\d+(?:\.\d{2})?(?:\s*per\s*(?:person|hour|game|session|day))?",
        r"from\s*£\d+(?:\.\d{2})?",
        r"starting\s*(?:at\s*)?£\d+(?:\.\d{2})?",
        r"prices?\s*from\s*£\d+(?:\.\d{2})?",
        r"group\s+rate(?:s)?",
        r"student\s+discount(?:s)?",
        r"family\s+ticket(?:s)?",
        r"season\s+pass(?:es)?",
        r"membership(?:s)?",
    ])
});

static PARTY_OPTIONS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"birthday\s+part(?:y|ies)",
        r"group\s+booking(?:s)?",
        r"corporate\s+event(?:s)?",
        r"team\s+building",
        r"hen\s+(?:do|party)",
        r"stag\s+(?:do|party)",
        r"private\s+hire",
        r"exclusive\s+use",
        r"party\s+package(?:s)?",
    ])
});

static SPECIAL_FEATURES: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"award[\s-]?winning",
        r"unique",
        r"first\s+in\s+(?:uk|london|europe)",
        r"largest\s+in\s+(?:uk|london|europe)",
        r"biggest\s+in\s+(?:uk|london|europe)",
        r"multi[\s-]?level",
        r"state[\s-]?of[\s-]?the[\s-]?art",
        r"cutting[\s-]?edge",
        r"immersive",
        r"themed",
    ])
});

/// The ordered attraction matchers for a category, or the generic fallback
/// when the category has no dedicated list.
pub fn attraction_patterns(category: &str) -> &'static [Regex] {
    CATEGORY_ATTRACTIONS
        .get(category)
        .map(|v| v.as_slice())
        .unwrap_or(&GENERIC_ATTRACTIONS)
}

pub fn common_facility_patterns() -> &'static [Regex] {
    &COMMON_FACILITIES
}

pub fn age_group_patterns() -> &'static [Regex] {
    &AGE_GROUPS
}

pub fn pricing_patterns() -> &'static [Regex] {
    &PRICING
}

pub fn party_patterns() -> &'static [Regex] {
    &PARTY_OPTIONS
}

pub fn special_feature_patterns() -> &'static [Regex] {
    &SPECIAL_FEATURES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedicated_category_lookup() {
        let patterns = attraction_patterns("bowling");
        assert!(patterns.iter().any(|p| p.is_match("ten pin bowling")));
        assert!(patterns.iter().any(|p| p.is_match("12 bowling lanes")));
    }

    #[test]
    fn test_unknown_category_gets_fallback() {
        let patterns = attraction_patterns("ice_skating");
        assert_eq!(patterns.len(), GENERIC_ATTRACTIONS.len());
        assert!(patterns.iter().any(|p| p.is_match("party room")));
    }

    #[test]
    fn test_patterns_are_case_insensitive() {
        assert!(attraction_patterns("trampoline")
            .iter()
            .any(|p| p.is_match("FOAM PIT")));
        assert!(pricing_patterns().iter().any(|p| p.is_match("FROM £12")));
    }

    #[test]
    fn test_hyphen_and_space_variants() {
        let special = special_feature_patterns();
        assert!(special.iter().any(|p| p.is_match("multi-level")));
        assert!(special.iter().any(|p| p.is_match("multi level")));
        assert!(special.iter().any(|p| p.is_match("award-winning")));
    }

    #[test]
    fn test_all_tables_compile_non_empty() {
        assert!(!common_facility_patterns().is_empty());
        assert!(!age_group_patterns().is_empty());
        assert!(!pricing_patterns().is_empty());
        assert!(!party_patterns().is_empty());
        assert!(!special_feature_patterns().is_empty());
    }
}
