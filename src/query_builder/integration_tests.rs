//! Query builder utilities
//!
//! This module provides GROQ query construction utilities.

#[cfg(test)]
mod integration_tests {
    use crate::query_builder::{Query, QueryChain, QueryOptions};
    use serde_json::json;
    use std::time::Instant;

    fn no_drafts() -> Query {
        Query::new(QueryOptions {
            include_drafts: true,
            ..Default::default()
        })
    }

    // ========================================
    // End-to-End Chains
    // ========================================

    #[test]
    fn test_full_chain_with_draft_exclusion() {
        let query = Query::default()
            .filter(json!({"_type": "'post'"}))
            .project(json!(["title", "body"]))
            .qualify(json!("[0]"))
            .build()
            .unwrap();

        assert_eq!(
            query,
            "*[!(_id in path('drafts.**')) && _type == 'post']{title, body}[0]"
        );
    }

    #[test]
    fn test_full_chain_with_order_and_slice() {
        let query = no_drafts()
            .filter(json!({"_type": "'post'", "published": true}))
            .project(json!(["title", ["'author'", "author", "->"]]))
            .set_order(json!(["_createdAt desc"]))
            .set_limit(json!([10, 5]))
            .build()
            .unwrap();

        assert_eq!(
            query,
            "*[_type == 'post' && published == true]{title, 'author'->author} | order(_createdAt desc) [10...15]"
        );
    }

    #[test]
    fn test_full_chain_with_nested_follow_projection() {
        let query = no_drafts()
            .filter(json!({"_type": "'post'"}))
            .project(json!([
                "title",
                {"'author'": [["'name'", ["author", "name", "->"], "->"]]}
            ]))
            .build()
            .unwrap();

        assert_eq!(
            query,
            "*[_type == 'post']{title, 'author':{'name'->{author->name}}}"
        );
    }

    #[test]
    fn test_full_chain_with_grouped_filters() {
        let query = no_drafts()
            .filter(json!([
                {"published": true},
                [{"join": "||"}, {"_type": "'post'"}, {"_type": "'page'"}]
            ]))
            .project(json!("title"))
            .build()
            .unwrap();

        assert_eq!(
            query,
            "*[published == true && (_type == 'post' || _type == 'page')].title"
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let build = || {
            Query::default()
                .filter(json!({"_type": "'post'"}))
                .project(json!(["title", {"'author'": ["name"]}]))
                .set_order(json!("title asc"))
                .set_limit(json!(3))
                .build()
                .unwrap()
        };

        assert_eq!(build(), build());
    }

    #[test]
    fn test_build_does_not_consume_state() {
        let query = no_drafts().filter(json!({"a": 1})).unwrap();

        assert_eq!(query.build(), query.build());
        assert_eq!(query.clone().project(json!("a")).unwrap().build(), "*[a == 1].a");
        assert_eq!(query.build(), "*[a == 1]");
    }

    #[test]
    fn test_error_surfaces_only_at_build() {
        let chain = Query::default()
            .filter(json!({"a": 1}))
            .project(json!(42))
            .set_order(json!("name asc"))
            .set_limit(json!(5));

        let error = QueryChain::build(chain).unwrap_err();
        assert_eq!(
            error.to_string(),
            "Projections must be a string, list of strings, or nested maps"
        );
        // the carried state predates the failing projection call
        assert_eq!(error.query().build(), "*[!(_id in path('drafts.**')) && a == 1]");
    }

    #[test]
    fn test_unicode_fields_pass_through() {
        let query = no_drafts()
            .filter(json!({"标题": "'新闻'"}))
            .project(json!(["标题", "正文"]))
            .build()
            .unwrap();

        assert_eq!(query, "*[标题 == '新闻']{标题, 正文}");
    }

    #[test]
    fn test_special_characters_in_values() {
        let query = no_drafts()
            .filter(json!({"slug.current": "'a/b-c'"}))
            .build()
            .unwrap();

        assert_eq!(query, "*[slug.current == 'a/b-c']");
    }

    // ========================================
    // Performance Edge Cases
    // ========================================

    #[test]
    fn test_performance_many_filters() {
        let start = Instant::now();

        let mut query = no_drafts();
        for i in 0..1000 {
            query = query.filter(json!([format!("field_{}", i), i])).unwrap();
        }

        let compiled = query.build();
        let duration = start.elapsed();

        assert!(duration.as_millis() < 100);
        assert_eq!(compiled.matches(" && ").count(), 999);
    }

    #[test]
    fn test_performance_deeply_nested_groups() {
        let start = Instant::now();

        // 50 levels of nested group lists
        let mut group = json!([{"join": "&&"}, {"base": 0}]);
        for i in 0..50 {
            let mut entry = serde_json::Map::new();
            entry.insert(format!("level_{}", i), json!(i));
            group = json!([{"join": "&&"}, entry, group]);
        }

        let compiled = no_drafts().filter(json!([group])).unwrap().build();
        let duration = start.elapsed();

        assert!(duration.as_millis() < 50);
        assert_eq!(compiled.matches('(').count(), 51);
    }

    #[test]
    fn test_performance_wide_projection() {
        let start = Instant::now();

        let fields: Vec<String> = (0..1000).map(|i| format!("field_{}", i)).collect();
        let compiled = no_drafts().project(json!(fields)).unwrap().build();
        let duration = start.elapsed();

        assert!(duration.as_millis() < 50);
        assert_eq!(compiled.matches(", ").count(), 999);
    }
}
