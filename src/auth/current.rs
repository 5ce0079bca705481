// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request-scoped access to the current authorization context.
//!
//! The context lives in a tokio task-local, so each in-flight request sees
//! only its own principal and authorities. Code running outside any scope,
//! including tasks spawned from inside one, sees the anonymous caller.
//!
//! ```rust,ignore
//! let context = extractor.extract(principal, &claims)?;
//! current::scope(context, async {
//!     if current::has_authority("ROLE_USER") {
//!         // ...
//!     }
//! })
//! .await;
//! ```

use std::collections::BTreeSet;
use std::future::Future;

use super::context::{AuthorizationContext, ANONYMOUS};

tokio::task_local! {
    static CURRENT: AuthorizationContext;
}

/// Run `future` with `context` installed as the current context.
///
/// Called once per request by the authorization middleware, right after a
/// successful extraction. A nested scope shadows the outer context until it
/// completes.
pub async fn scope<F: Future>(context: AuthorizationContext, future: F) -> F::Output {
    CURRENT.scope(context, future).await
}

/// Synchronous counterpart of [`scope`].
pub fn sync_scope<R>(context: AuthorizationContext, f: impl FnOnce() -> R) -> R {
    CURRENT.sync_scope(context, f)
}

/// Principal of the current request, or `anonymous` outside any scope.
pub fn current_principal() -> String {
    CURRENT
        .try_with(|ctx| ctx.principal().to_string())
        .unwrap_or_else(|_| {
            tracing::debug!("Request not authenticated, hence no user name available");
            ANONYMOUS.to_string()
        })
}

/// Authorities of the current request, empty outside any scope.
pub fn current_authorities() -> BTreeSet<String> {
    CURRENT
        .try_with(|ctx| ctx.authorities().clone())
        .unwrap_or_default()
}

pub fn current_context() -> Option<AuthorizationContext> {
    CURRENT.try_with(AuthorizationContext::clone).ok()
}

pub fn has_authority(authority: &str) -> bool {
    CURRENT
        .try_with(|ctx| ctx.has_authority(authority))
        .unwrap_or(false)
}

pub fn has_any_authority(authorities: &[&str]) -> bool {
    CURRENT
        .try_with(|ctx| ctx.has_any_authority(authorities))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{extract_authorization_context, RawClaims};
    use serde_json::json;

    fn context_for(principal: &str, role: &str) -> AuthorizationContext {
        let claims = RawClaims::try_from(json!({
            "resource_access": { "app1": { "roles": [role] } }
        }))
        .unwrap();
        extract_authorization_context(Some(principal), &claims).unwrap()
    }

    #[test]
    fn fallbacks_without_context() {
        assert_eq!(current_principal(), ANONYMOUS);
        assert!(current_authorities().is_empty());
        assert!(current_context().is_none());
        assert!(!has_authority("ROLE_USER"));
    }

    #[tokio::test]
    async fn scope_exposes_context_and_ends_with_it() {
        let ctx = context_for("alice", "user");

        let (principal, authorities) =
            scope(ctx.clone(), async { (current_principal(), current_authorities()) }).await;
        assert_eq!(principal, "alice");
        assert_eq!(&authorities, ctx.authorities());

        assert_eq!(current_principal(), ANONYMOUS);
    }

    #[test]
    fn alice_is_allowed_user_but_not_admin() {
        let ctx = context_for("alice", "user");

        sync_scope(ctx, || {
            assert!(has_authority("ROLE_user"));
            assert!(!has_authority("ROLE_admin"));
            assert!(has_any_authority(&["ROLE_admin", "ROLE_user"]));
            assert_eq!(current_context().unwrap().principal(), "alice");
        });
    }

    #[tokio::test]
    async fn nested_scope_shadows_outer() {
        let outer = context_for("alice", "user");
        let inner = context_for("bob", "admin");

        scope(outer, async {
            let seen = scope(inner, async { current_principal() }).await;
            assert_eq!(seen, "bob");
            assert_eq!(current_principal(), "alice");
        })
        .await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_requests_are_isolated() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let name = format!("user-{i}");
                let ctx = context_for(&name, &format!("role{i}"));
                tokio::spawn(scope(ctx, async move {
                    tokio::task::yield_now().await;
                    (name, current_principal(), current_authorities())
                }))
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let (expected, principal, authorities) = handle.await.unwrap();
            assert_eq!(principal, expected);
            assert_eq!(authorities.len(), 1);
            assert!(authorities.contains(&format!("ROLE_role{i}")));
        }
    }

    #[tokio::test]
    async fn spawned_tasks_do_not_inherit_context() {
        let ctx = context_for("alice", "user");

        let inherited = scope(ctx, async {
            tokio::spawn(async { current_principal() }).await.unwrap()
        })
        .await;
        assert_eq!(inherited, ANONYMOUS);
    }
}
