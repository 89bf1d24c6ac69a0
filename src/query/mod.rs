//! Query string utilities.
//!
//! Parameter-level helpers shared by the routing engine and page code:
//!
//! | Function                        | Purpose                                    |
//! |---------------------------------|--------------------------------------------|
//! | [`update_search_params`]        | set/delete keys on a caller-owned list     |
//! | [`rebuild_path_with_params`]    | merge extra params into a relative URL     |
//! | [`remove_query_params_from_path`] | drop keys from a relative URL            |
//! | [`build_url_set`]               | one URL per value of a single key          |
//!
//! Valueless parameters (`?server_only`) keep their flag form through every
//! helper here.

mod params;

pub use params::{ParamValue, SearchParams};

/// Apply `updates` to `params` in place.
///
/// Unset values (empty text, `false`, `Null`, `NaN`) delete the key; any
/// other value, numeric zero included, overwrites it at its current position
/// or appends it.
pub fn update_search_params<K, V, I>(params: &mut SearchParams, updates: I)
where
    K: AsRef<str>,
    V: Into<ParamValue>,
    I: IntoIterator<Item = (K, V)>,
{
    for (key, value) in updates {
        let value = value.into();
        if value.is_unset() {
            params.delete(key.as_ref());
        } else {
            params.set(key.as_ref(), value.to_param_string());
        }
    }
}

/// Merge `extra_params` into the query of `url` and return the relative URL.
///
/// # Example
/// ```ignore
/// rebuild_path_with_params("/p?server_only", [("offset", 0)]) -> "/p?server_only&offset=0"
/// rebuild_path_with_params("/p?a=1", [("a", "")])              -> "/p"
/// ```
pub fn rebuild_path_with_params<K, V, I>(url: &str, extra_params: I) -> String
where
    K: AsRef<str>,
    V: Into<ParamValue>,
    I: IntoIterator<Item = (K, V)>,
{
    let (pathname, search) = split_query(url);
    let mut params = SearchParams::parse(search);
    update_search_params(&mut params, extra_params);
    join_query(pathname, &params)
}

/// Remove every listed key from the query of `path`.
pub fn remove_query_params_from_path<K, I>(path: &str, keys: I) -> String
where
    K: AsRef<str>,
    I: IntoIterator<Item = K>,
{
    let (pathname, search) = split_query(path);
    let mut params = SearchParams::parse(search);
    for key in keys {
        let key = key.as_ref();
        if params.has(key) {
            params.delete(key);
        }
    }
    join_query(pathname, &params)
}

/// Build one URL per entry in `values`, each setting `key` to that value on
/// top of `extra_params`.
///
/// `key` is applied before `extra_params`, so an extra param with the same
/// name wins. An empty `values` yields an empty list whatever `url` is.
pub fn build_url_set<V, I>(
    url: &str,
    key: &str,
    values: I,
    extra_params: &[(&str, ParamValue)],
) -> Vec<String>
where
    V: Into<ParamValue>,
    I: IntoIterator<Item = V>,
{
    values
        .into_iter()
        .map(|value| {
            let updates = std::iter::once((key, value.into()))
                .chain(extra_params.iter().map(|(k, v)| (*k, v.clone())));
            rebuild_path_with_params(url, updates)
        })
        .collect()
}

/// Split at the first `?`. The search part excludes the `?`.
pub(crate) fn split_query(url: &str) -> (&str, &str) {
    url.split_once('?').unwrap_or((url, ""))
}

/// Join a pathname with serialized params, omitting `?` when nothing remains.
pub(crate) fn join_query(pathname: &str, params: &SearchParams) -> String {
    let query = params.to_flag_string();
    if query.is_empty() {
        pathname.to_string()
    } else {
        format!("{pathname}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_search_params_sets_and_deletes() {
        let mut params = SearchParams::parse("a=1&b=2&c=3");
        update_search_params(
            &mut params,
            [
                ("a", ParamValue::from("x")),
                ("b", ParamValue::from("")),
                ("d", ParamValue::from(4)),
            ],
        );
        assert_eq!(params.serialize(), "a=x&c=3&d=4");
    }

    #[test]
    fn test_update_search_params_keeps_zero() {
        let mut params = SearchParams::parse("offset=25");
        update_search_params(&mut params, [("offset", 0)]);
        assert_eq!(params.get("offset"), Some("0"));
    }

    #[test]
    fn test_update_search_params_deletes_on_null_and_false() {
        let mut params = SearchParams::parse("refine=a&limit=5");
        update_search_params(
            &mut params,
            [("refine", ParamValue::Null), ("limit", ParamValue::from(false))],
        );
        assert!(params.is_empty());
    }

    #[test]
    fn test_rebuild_path_with_params() {
        assert_eq!(
            rebuild_path_with_params("/en/product/25501032M?color=black", [("size", "M")]),
            "/en/product/25501032M?color=black&size=M"
        );
    }

    #[test]
    fn test_rebuild_path_with_params_overwrites_in_place() {
        assert_eq!(
            rebuild_path_with_params("/search?q=shoes&offset=25&limit=25", [("offset", 50)]),
            "/search?q=shoes&offset=50&limit=25"
        );
    }

    #[test]
    fn test_rebuild_path_with_params_flag_idempotent() {
        let once = rebuild_path_with_params("/p?server_only", [("offset", 0)]);
        assert_eq!(once, "/p?server_only&offset=0");
        let twice = rebuild_path_with_params(&once, [("offset", 0)]);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_rebuild_path_with_params_no_params_left() {
        assert_eq!(rebuild_path_with_params("/p?offset=5", [("offset", "")]), "/p");
        assert_eq!(
            rebuild_path_with_params("/p", std::iter::empty::<(&str, ParamValue)>()),
            "/p"
        );
    }

    #[test]
    fn test_remove_query_params_from_path() {
        assert_eq!(
            remove_query_params_from_path(
                "/en/product/25501032M?color=black&size=M&something=123",
                ["color", "size"]
            ),
            "/en/product/25501032M?something=123"
        );
    }

    #[test]
    fn test_remove_query_params_from_path_all_removed() {
        assert_eq!(
            remove_query_params_from_path("/en/product/25501032M?color=black", ["color"]),
            "/en/product/25501032M"
        );
    }

    #[test]
    fn test_remove_query_params_from_path_keeps_flags() {
        assert_eq!(
            remove_query_params_from_path("/p?server_only&color=black", ["color", "missing"]),
            "/p?server_only"
        );
    }

    #[test]
    fn test_build_url_set() {
        assert_eq!(
            build_url_set("/mens/clothing?sort=high-to-low", "offset", [0, 5, 10], &[]),
            vec![
                "/mens/clothing?sort=high-to-low&offset=0",
                "/mens/clothing?sort=high-to-low&offset=5",
                "/mens/clothing?sort=high-to-low&offset=10",
            ]
        );
    }

    #[test]
    fn test_build_url_set_empty_values() {
        assert!(build_url_set("/anything?x=1", "k", Vec::<i32>::new(), &[]).is_empty());
        assert!(build_url_set("", "k", Vec::<i32>::new(), &[]).is_empty());
    }

    #[test]
    fn test_build_url_set_with_extra_params() {
        assert_eq!(
            build_url_set(
                "/mens/clothing",
                "sort",
                ["best-matches", "price-low-to-high"],
                &[("offset", ParamValue::from(0))]
            ),
            vec![
                "/mens/clothing?sort=best-matches&offset=0",
                "/mens/clothing?sort=price-low-to-high&offset=0",
            ]
        );
    }

    #[test]
    fn test_build_url_set_extra_param_overrides_key() {
        assert_eq!(
            build_url_set("/c", "offset", [5], &[("offset", ParamValue::from(0))]),
            vec!["/c?offset=0"]
        );
    }
}
