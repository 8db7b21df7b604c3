//! Store key layout shared by the cache components.
//!
//! | Key | Type | Written by |
//! |-----|------|------------|
//! | `<uuid>` | string | object cache `store` |
//! | `<operation>` | integer | call counter |
//! | `<operation>:inputs` | list | call history |
//! | `<operation>:outputs` | list | call history |
//! | `cache:<url>` | string with TTL | page cache |
//! | `count:<url>` | integer | page cache access counter |

/// Qualified name of the object cache's store operation.
pub const STORE_OPERATION: &str = "Cache.store";

/// Key of the list holding serialized arguments of `operation`.
pub fn inputs_key(operation: &str) -> String {
    format!("{}:inputs", operation)
}

/// Key of the list holding serialized results of `operation`.
pub fn outputs_key(operation: &str) -> String {
    format!("{}:outputs", operation)
}

/// Key under which the body of `url` is cached.
pub fn page_cache_key(url: &str) -> String {
    format!("cache:{}", url)
}

/// Key of the access counter for `url`.
pub fn page_count_key(url: &str) -> String {
    format!("count:{}", url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_keys() {
        assert_eq!(inputs_key(STORE_OPERATION), "Cache.store:inputs");
        assert_eq!(outputs_key(STORE_OPERATION), "Cache.store:outputs");
    }

    #[test]
    fn test_page_keys() {
        assert_eq!(page_cache_key("http://x"), "cache:http://x");
        assert_eq!(page_count_key("http://x"), "count:http://x");
    }
}
