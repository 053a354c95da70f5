//! Cache key construction.
//!
//! Keys are built from the operation name and every effective parameter
//! (after defaults are applied). Each operation kind owns a literal prefix
//! so keys never collide across kinds.

/// Key prefix for random-photo lookups.
pub const RANDOM_PREFIX: &str = "random";
/// Key prefix for search lookups.
pub const SEARCH_PREFIX: &str = "search";
/// Key prefix for topic lookups.
pub const TOPIC_PREFIX: &str = "topic";

/// Placeholder used in random-photo keys when no query is given.
pub const NO_QUERY: &str = "no-query";

/// `random-{count}-{query|"no-query"}`
pub fn random_key(count: u32, query: Option<&str>) -> String {
    format!("{RANDOM_PREFIX}-{count}-{}", query.unwrap_or(NO_QUERY))
}

/// `search-{query}-{page}-{per_page}`
pub fn search_key(query: &str, page: u32, per_page: u32) -> String {
    format!("{SEARCH_PREFIX}-{query}-{page}-{per_page}")
}

/// `topic-{topic}-{page}-{per_page}`
pub fn topic_key(topic: &str, page: u32, per_page: u32) -> String {
    format!("{TOPIC_PREFIX}-{topic}-{page}-{per_page}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_key_is_deterministic() {
        assert_eq!(random_key(5, Some("cats")), random_key(5, Some("cats")));
        assert_eq!(random_key(5, None), "random-5-no-query");
    }

    #[test]
    fn random_key_distinguishes_query() {
        assert_ne!(random_key(5, None), random_key(5, Some("cats")));
        assert_ne!(random_key(5, Some("cats")), random_key(6, Some("cats")));
    }

    #[test]
    fn paged_keys_include_every_parameter() {
        assert_eq!(search_key("ocean", 2, 10), "search-ocean-2-10");
        assert_eq!(topic_key("nature", 1, 30), "topic-nature-1-30");
        assert_ne!(search_key("ocean", 1, 10), search_key("ocean", 2, 10));
        assert_ne!(search_key("ocean", 1, 10), search_key("ocean", 1, 20));
    }

    #[test]
    fn kinds_never_collide() {
        assert_ne!(search_key("nature", 1, 10), topic_key("nature", 1, 10));
        assert!(random_key(1, Some("x")).starts_with("random-"));
        assert!(search_key("x", 1, 1).starts_with("search-"));
        assert!(topic_key("x", 1, 1).starts_with("topic-"));
    }
}
