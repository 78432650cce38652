//! Encoding of list requests into [Strapi] query parameters.
//!
//! Nested objects are expressed with bracketed keys, like
//! `filters[city][slug][$eq]=paris` or `sort[0]=createdAt:desc`.
//!
//! [Strapi]: https://strapi.io

use serde_json::Value;

use crate::{
    infra::content_store::predicate::{Condition, Operator, Predicate},
    read::listing::list::{Field, Selector, Sort},
};

/// Relations populated on every listing read.
pub const POPULATE: &[&str] = &["images", "category", "city", "tags", "owner"];

/// Single query parameter.
pub type Param = (String, String);

/// Encodes the whole list request described by the provided [`Selector`].
#[must_use]
pub fn list(selector: &Selector) -> Vec<Param> {
    let mut params = filters(&Predicate::from(&selector.filter));
    params.extend(populate());
    params.extend(pagination(
        selector.arguments.page(),
        selector.arguments.page_size(),
    ));
    params.extend(sort(selector.sort));
    params
}

/// Encodes the provided [`Predicate`] as `filters` parameters.
///
/// [`Condition`]s are rendered side by side, unless two of them collide on
/// the same key, in which case all of them are wrapped into an explicit
/// `$and` list.
#[must_use]
pub fn filters(predicate: &Predicate) -> Vec<Param> {
    let conditions = predicate.conditions();
    let collides = conditions.iter().enumerate().any(|(i, c)| {
        conditions[..i].iter().any(|p| {
            p.path == c.path && operator(&p.operator) == operator(&c.operator)
        })
    });

    conditions
        .iter()
        .enumerate()
        .flat_map(|(i, cond)| {
            let prefix = if collides {
                format!("filters[$and][{i}]")
            } else {
                "filters".to_owned()
            };
            condition(&prefix, cond)
        })
        .collect()
}

/// Encodes a single [`Condition`] under the provided key `prefix`.
fn condition(prefix: &str, cond: &Condition) -> Vec<Param> {
    let mut key = prefix.to_owned();
    for segment in cond.path.segments() {
        key.push('[');
        key.push_str(segment);
        key.push(']');
    }
    key.push('[');
    key.push_str(operator(&cond.operator));
    key.push(']');

    match &cond.operator {
        Operator::Eq(value) => vec![(key, scalar(value))],
        Operator::StartsWith(start) => vec![(key, start.clone())],
        Operator::In(values) => values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("{key}[{i}]"), scalar(v)))
            .collect(),
    }
}

/// Returns the [Strapi] name of the provided [`Operator`].
///
/// [Strapi]: https://strapi.io
fn operator(op: &Operator) -> &'static str {
    match op {
        Operator::Eq(_) => "$eq",
        Operator::StartsWith(_) => "$startsWith",
        Operator::In(_) => "$in",
    }
}

/// Renders the provided scalar [`Value`] as a query parameter value.
fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::Array(_)
        | Value::Object(_) => value.to_string(),
    }
}

/// Encodes the [`POPULATE`]d relations.
pub fn populate() -> impl Iterator<Item = Param> {
    POPULATE
        .iter()
        .enumerate()
        .map(|(i, rel)| (format!("populate[{i}]"), (*rel).to_owned()))
}

/// Encodes the page window.
fn pagination(page: usize, page_size: usize) -> [Param; 2] {
    [
        ("pagination[page]".to_owned(), page.to_string()),
        ("pagination[pageSize]".to_owned(), page_size.to_string()),
    ]
}

/// Encodes the provided [`Sort`] as ordered `field:direction` directives.
fn sort(sort: Sort) -> impl Iterator<Item = Param> {
    sort.keys().iter().enumerate().map(|(i, (field, order))| {
        let directive = format!("{}:{}", field_name(*field), order.as_str());
        (format!("sort[{i}]"), directive)
    })
}

/// Returns the [Strapi] attribute name of the provided [`Field`].
///
/// [Strapi]: https://strapi.io
fn field_name(field: Field) -> &'static str {
    match field {
        Field::CreatedAt => "createdAt",
        Field::HomepagePosition => "homepagePosition",
        Field::CategoryPosition => "categoryPosition",
    }
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::{
        domain::Slug,
        infra::content_store::predicate::{Condition, Operator, Path, Predicate},
        read::listing::list::{Arguments, Filter, Selector, Sort},
    };

    use super::{filters, list};

    fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
        params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn encodes_listing_request() {
        let selector = Selector {
            arguments: Arguments::new(Some(2), Some(12), 10),
            filter: Filter {
                city: Some(Slug::new("paris").unwrap()),
                tags: vec![
                    Slug::new("cheap").unwrap(),
                    Slug::new("fast").unwrap(),
                ],
                featured: Some(true),
                ..Filter::default()
            },
            sort: Sort::Newest,
        };

        assert_eq!(
            pairs(&list(&selector)),
            [
                ("filters[city][slug][$eq]", "paris"),
                ("filters[tags][slug][$in][0]", "cheap"),
                ("filters[tags][slug][$in][1]", "fast"),
                ("filters[featured][$eq]", "true"),
                ("populate[0]", "images"),
                ("populate[1]", "category"),
                ("populate[2]", "city"),
                ("populate[3]", "tags"),
                ("populate[4]", "owner"),
                ("pagination[page]", "2"),
                ("pagination[pageSize]", "12"),
                ("sort[0]", "createdAt:desc"),
            ],
        );
    }

    #[test]
    fn encodes_curation_sort() {
        let selector = Selector {
            arguments: Arguments::first(100),
            filter: Filter::default(),
            sort: Sort::CategoryCuration,
        };
        let params = list(&selector);
        let sort: Vec<_> = pairs(&params)
            .into_iter()
            .filter(|(k, _)| k.starts_with("sort"))
            .collect();

        assert_eq!(
            sort,
            [
                ("sort[0]", "categoryPosition:asc"),
                ("sort[1]", "createdAt:desc"),
            ],
        );
        assert!(!params.iter().any(|(k, _)| k.starts_with("filters")));
    }

    #[test]
    fn encodes_prefix_status_and_owner() {
        let filter = Filter {
            status: Some("sold".parse().unwrap()),
            slug_prefix: Some("acme".into()),
            owner: Some(42.into()),
            ..Filter::default()
        };

        assert_eq!(
            pairs(&filters(&Predicate::from(&filter))),
            [
                ("filters[status][$eq]", "sold"),
                ("filters[slug][$startsWith]", "acme"),
                ("filters[owner][id][$eq]", "42"),
            ],
        );
    }

    #[test]
    fn wraps_colliding_conditions_into_and() {
        let predicate = Predicate::new([
            Condition::new(Path::SLUG, Operator::StartsWith("ac".into())),
            Condition::new(Path::SLUG, Operator::StartsWith("acme".into())),
            Condition::new(Path::FEATURED, Operator::Eq(json!(false))),
        ]);

        assert_eq!(
            pairs(&filters(&predicate)),
            [
                ("filters[$and][0][slug][$startsWith]", "ac"),
                ("filters[$and][1][slug][$startsWith]", "acme"),
                ("filters[$and][2][featured][$eq]", "false"),
            ],
        );
    }

    #[test]
    fn is_deterministic() {
        let filter = Filter {
            category: Some(Slug::new("plumbers").unwrap()),
            tags: vec![Slug::new("b").unwrap(), Slug::new("a").unwrap()],
            ..Filter::default()
        };

        assert_eq!(
            filters(&Predicate::from(&filter)),
            filters(&Predicate::from(&filter.clone())),
        );
    }

    #[test]
    fn encodes_category_display_sort() {
        let selector = Selector {
            arguments: Arguments::first(10),
            filter: Filter::default(),
            sort: Sort::CategoryDisplay,
        };
        let params = list(&selector);
        let sort: Vec<_> = pairs(&params)
            .into_iter()
            .filter(|(k, _)| k.starts_with("sort"))
            .collect();

        assert_eq!(
            sort,
            [
                ("sort[0]", "categoryPosition:asc"),
                ("sort[1]", "createdAt:asc"),
            ],
        );
    }
}
