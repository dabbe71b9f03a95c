// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Manual path dispatch for the list and item resource families.
//!
//! Paths under `/resource/lists/` and `/resource/items/` mix collection,
//! singleton and action-suffix shapes under one prefix, so they are not
//! registered as individual axum routes. Instead each family has a small
//! table of [`RoutePattern`]s matched against the trailing path segments in
//! priority order. Suffix shapes come first so that `.../toggle` or
//! `.../items` is never parsed as an id.
//!
//! ```text
//! /resource/lists/5            GET | PUT | PATCH | DELETE
//! /resource/lists/5/items      GET
//! /resource/lists/5/items/     POST   (any final segment is accepted)
//! /resource/lists/5/items/3    POST   (GET and others are 405)
//! /resource/items/3            GET | PUT | PATCH | DELETE
//! /resource/items/3/toggle     PATCH
//! ```

use axum::http::Method;
use thiserror::Error;

pub const LISTS_PREFIX: &str = "/resource/lists/";
pub const ITEMS_PREFIX: &str = "/resource/items/";

/// Resource database id.
pub type ResourceId = i64;

/// A resolved resource operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetList(ResourceId),
    UpdateList(ResourceId),
    DeleteList(ResourceId),
    ListItems(ResourceId),
    CreateItem(ResourceId),
    GetItem(ResourceId),
    UpdateItem(ResourceId),
    DeleteItem(ResourceId),
    ToggleItem(ResourceId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Resource not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid resource id: {segment:?}")]
    InvalidId { segment: String },
}

/// One segment of a route pattern, matched right-aligned against the path.
#[derive(Debug, Clone, Copy)]
enum Seg {
    /// The integer resource id.
    Id,
    /// A fixed literal.
    Lit(&'static str),
    /// Any segment, including an empty one.
    Any,
}

/// Maps a method to an operation constructor for one path shape.
type MethodTable = fn(&Method) -> Option<fn(ResourceId) -> Operation>;

/// A path shape: the trailing segments it must end with, and the operations
/// it accepts per method.
struct RoutePattern {
    tail: &'static [Seg],
    methods: MethodTable,
}

impl RoutePattern {
    /// Returns the raw id segment when `segments` ends with this pattern.
    fn capture<'a>(&self, segments: &[&'a str]) -> Option<&'a str> {
        if segments.len() < self.tail.len() {
            return None;
        }
        let window = &segments[segments.len() - self.tail.len()..];
        let mut id = None;
        for (seg, pattern) in window.iter().zip(self.tail) {
            match pattern {
                Seg::Id => id = Some(*seg),
                Seg::Lit(lit) if seg != lit => return None,
                Seg::Lit(_) | Seg::Any => {}
            }
        }
        id
    }
}

fn singleton_methods(
    get: fn(ResourceId) -> Operation,
    update: fn(ResourceId) -> Operation,
    delete: fn(ResourceId) -> Operation,
    method: &Method,
) -> Option<fn(ResourceId) -> Operation> {
    match *method {
        Method::GET => Some(get),
        Method::PUT | Method::PATCH => Some(update),
        Method::DELETE => Some(delete),
        _ => None,
    }
}

const LIST_ROUTES: &[RoutePattern] = &[
    RoutePattern {
        tail: &[Seg::Id, Seg::Lit("items")],
        methods: |m| (*m == Method::GET).then_some(Operation::ListItems as fn(_) -> _),
    },
    RoutePattern {
        tail: &[Seg::Id, Seg::Lit("items"), Seg::Any],
        methods: |m| (*m == Method::POST).then_some(Operation::CreateItem as fn(_) -> _),
    },
    RoutePattern {
        tail: &[Seg::Id],
        methods: |m| {
            singleton_methods(
                Operation::GetList,
                Operation::UpdateList,
                Operation::DeleteList,
                m,
            )
        },
    },
];

const ITEM_ROUTES: &[RoutePattern] = &[
    RoutePattern {
        tail: &[Seg::Id, Seg::Lit("toggle")],
        methods: |m| (*m == Method::PATCH).then_some(Operation::ToggleItem as fn(_) -> _),
    },
    RoutePattern {
        tail: &[Seg::Id],
        methods: |m| {
            singleton_methods(
                Operation::GetItem,
                Operation::UpdateItem,
                Operation::DeleteItem,
                m,
            )
        },
    },
];

/// Resolve a request under [`LISTS_PREFIX`].
pub fn dispatch_list(method: &Method, path: &str) -> Result<Operation, DispatchError> {
    dispatch(LISTS_PREFIX, LIST_ROUTES, method, path)
}

/// Resolve a request under [`ITEMS_PREFIX`].
pub fn dispatch_item(method: &Method, path: &str) -> Result<Operation, DispatchError> {
    dispatch(ITEMS_PREFIX, ITEM_ROUTES, method, path)
}

fn dispatch(
    prefix: &str,
    routes: &[RoutePattern],
    method: &Method,
    path: &str,
) -> Result<Operation, DispatchError> {
    let rest = path.strip_prefix(prefix).ok_or(DispatchError::NotFound)?;
    if rest.is_empty() {
        return Err(DispatchError::NotFound);
    }
    let segments: Vec<&str> = rest.split('/').collect();

    for route in routes {
        let Some(raw_id) = route.capture(&segments) else {
            continue;
        };
        let build = (route.methods)(method).ok_or(DispatchError::MethodNotAllowed)?;
        return parse_id(raw_id).map(build);
    }

    // The final pattern of every family is a bare id, which matches any
    // non-empty segment list.
    Err(DispatchError::NotFound)
}

fn parse_id(segment: &str) -> Result<ResourceId, DispatchError> {
    segment
        .parse::<ResourceId>()
        .map_err(|_| DispatchError::InvalidId {
            segment: segment.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_singleton_methods() {
        let path = "/resource/lists/5";
        assert_eq!(dispatch_list(&Method::GET, path), Ok(Operation::GetList(5)));
        assert_eq!(dispatch_list(&Method::PUT, path), Ok(Operation::UpdateList(5)));
        assert_eq!(dispatch_list(&Method::PATCH, path), Ok(Operation::UpdateList(5)));
        assert_eq!(dispatch_list(&Method::DELETE, path), Ok(Operation::DeleteList(5)));
        assert_eq!(
            dispatch_list(&Method::POST, path),
            Err(DispatchError::MethodNotAllowed)
        );
    }

    #[test]
    fn bare_prefix_is_not_found() {
        assert_eq!(
            dispatch_list(&Method::GET, "/resource/lists/"),
            Err(DispatchError::NotFound)
        );
        assert_eq!(
            dispatch_item(&Method::GET, "/resource/items/"),
            Err(DispatchError::NotFound)
        );
        assert_eq!(
            dispatch_list(&Method::GET, "/elsewhere/5"),
            Err(DispatchError::NotFound)
        );
    }

    #[test]
    fn items_collection_suffix() {
        assert_eq!(
            dispatch_list(&Method::GET, "/resource/lists/5/items"),
            Ok(Operation::ListItems(5))
        );
        assert_eq!(
            dispatch_list(&Method::DELETE, "/resource/lists/5/items"),
            Err(DispatchError::MethodNotAllowed)
        );
    }

    #[test]
    fn create_item_shapes() {
        assert_eq!(
            dispatch_list(&Method::POST, "/resource/lists/5/items/"),
            Ok(Operation::CreateItem(5))
        );
        assert_eq!(
            dispatch_list(&Method::POST, "/resource/lists/5/items/3"),
            Ok(Operation::CreateItem(5))
        );
        // Must not fall through to "last segment is a list id".
        assert_eq!(
            dispatch_list(&Method::GET, "/resource/lists/5/items/3"),
            Err(DispatchError::MethodNotAllowed)
        );
    }

    #[test]
    fn non_integer_ids_are_bad_requests() {
        assert_eq!(
            dispatch_list(&Method::GET, "/resource/lists/abc"),
            Err(DispatchError::InvalidId {
                segment: "abc".into()
            })
        );
        assert_eq!(
            dispatch_list(&Method::GET, "/resource/lists/abc/items"),
            Err(DispatchError::InvalidId {
                segment: "abc".into()
            })
        );
        assert_eq!(
            dispatch_list(&Method::GET, "/resource/lists/5/"),
            Err(DispatchError::InvalidId {
                segment: "".into()
            })
        );
        assert_eq!(
            dispatch_item(&Method::PATCH, "/resource/items/x/toggle"),
            Err(DispatchError::InvalidId { segment: "x".into() })
        );
    }

    #[test]
    fn method_is_checked_before_id() {
        assert_eq!(
            dispatch_list(&Method::POST, "/resource/lists/abc"),
            Err(DispatchError::MethodNotAllowed)
        );
    }

    #[test]
    fn toggle_suffix_runs_before_id_parse() {
        assert_eq!(
            dispatch_item(&Method::PATCH, "/resource/items/3/toggle"),
            Ok(Operation::ToggleItem(3))
        );
        assert_eq!(
            dispatch_item(&Method::PUT, "/resource/items/3/toggle"),
            Err(DispatchError::MethodNotAllowed)
        );
        assert_eq!(
            dispatch_item(&Method::GET, "/resource/items/3/toggle"),
            Err(DispatchError::MethodNotAllowed)
        );
    }

    #[test]
    fn item_singleton_methods() {
        let path = "/resource/items/3";
        assert_eq!(dispatch_item(&Method::GET, path), Ok(Operation::GetItem(3)));
        assert_eq!(dispatch_item(&Method::PUT, path), Ok(Operation::UpdateItem(3)));
        assert_eq!(dispatch_item(&Method::PATCH, path), Ok(Operation::UpdateItem(3)));
        assert_eq!(dispatch_item(&Method::DELETE, path), Ok(Operation::DeleteItem(3)));
        assert_eq!(
            dispatch_item(&Method::POST, path),
            Err(DispatchError::MethodNotAllowed)
        );
    }

    #[test]
    fn only_trailing_segment_is_the_id() {
        assert_eq!(
            dispatch_item(&Method::GET, "/resource/items/9/3"),
            Ok(Operation::GetItem(3))
        );
    }
}
