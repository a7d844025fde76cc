//! The bidirectional transformer contract.
//!
//! # Design
//!
//! A transformer is any value providing three capabilities: an eligibility
//! predicate and two direction-specific transform operations. There is no
//! base-class hierarchy; concrete plugins implement the trait directly, and
//! [`Partial`] composes a predicate with any inner transformer.
//!
//! Each operation receives one unit and an encoding hint and completes
//! exactly once: the returned future resolves with [`Outcome::Emit`] (one
//! resulting unit), [`Outcome::Suppress`] (explicit empty result), or an
//! error. Operations take `&Unit`, so the input cannot be mutated in place;
//! outputs are built with [`Unit::replacing_content`].
//!
//! Transformers hold only read-only configuration after construction, so
//! concurrent per-unit invocations are independent and reentrant-safe.

use async_trait::async_trait;
use transform_core::ExtensionFilter;
use transform_types::{Encoding, Outcome, TransformError, Unit};

/// The bidirectional plugin contract.
///
/// The pipeline host invokes [`is_eligible`](Transformer::is_eligible)
/// first, then one of the two operations, once per unit per direction.
#[async_trait]
pub trait Transformer: Send + Sync {
    /// Decide whether this transformer acts on the given unit.
    ///
    /// Must be a pure predicate over identifying metadata: deterministic,
    /// total, and free of side effects.
    fn is_eligible(&self, unit: &Unit) -> bool;

    /// Forward direction: convert a filesystem unit into the unit pushed
    /// toward the server.
    async fn to_server(&self, unit: &Unit, encoding: Encoding)
        -> Result<Outcome, TransformError>;

    /// Reverse direction: convert a server-side unit into its filesystem
    /// representation.
    ///
    /// One-way transforms must return [`Outcome::Suppress`] here rather than
    /// regenerate lossy content over the authoritative source.
    async fn to_filesystem(
        &self,
        unit: &Unit,
        encoding: Encoding,
    ) -> Result<Outcome, TransformError>;
}

/// Decorator composing an eligibility predicate with any transformer.
///
/// Ineligible units pass through unmodified in both directions; eligible
/// units delegate to the inner transformer.
pub struct Partial<T> {
    predicate: Box<dyn Fn(&Unit) -> bool + Send + Sync>,
    inner: T,
}

impl<T: Transformer> Partial<T> {
    /// Wrap a transformer with an arbitrary predicate.
    pub fn new(inner: T, predicate: impl Fn(&Unit) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Box::new(predicate),
            inner,
        }
    }

    /// Wrap a transformer with an extension predicate.
    pub fn for_extension(inner: T, extension: &str) -> Self {
        let filter = ExtensionFilter::new(extension);
        Self::new(inner, move |unit| filter.matches(unit))
    }

    /// The wrapped transformer.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Transformer> Transformer for Partial<T> {
    fn is_eligible(&self, unit: &Unit) -> bool {
        (self.predicate)(unit)
    }

    async fn to_server(
        &self,
        unit: &Unit,
        encoding: Encoding,
    ) -> Result<Outcome, TransformError> {
        if !self.is_eligible(unit) {
            return Ok(Outcome::Emit(unit.clone()));
        }
        self.inner.to_server(unit, encoding).await
    }

    async fn to_filesystem(
        &self,
        unit: &Unit,
        encoding: Encoding,
    ) -> Result<Outcome, TransformError> {
        if !self.is_eligible(unit) {
            return Ok(Outcome::Emit(unit.clone()));
        }
        self.inner.to_filesystem(unit, encoding).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transform_types::UnitOrigin;

    /// Test transformer: uppercases content forward, lowercases it back.
    struct CaseShift;

    #[async_trait]
    impl Transformer for CaseShift {
        fn is_eligible(&self, _unit: &Unit) -> bool {
            true
        }

        async fn to_server(
            &self,
            unit: &Unit,
            _encoding: Encoding,
        ) -> Result<Outcome, TransformError> {
            let shifted = unit.content.to_ascii_uppercase();
            Ok(Outcome::Emit(
                unit.replacing_content(shifted, UnitOrigin::Server),
            ))
        }

        async fn to_filesystem(
            &self,
            unit: &Unit,
            _encoding: Encoding,
        ) -> Result<Outcome, TransformError> {
            let shifted = unit.content.to_ascii_lowercase();
            Ok(Outcome::Emit(
                unit.replacing_content(shifted, UnitOrigin::Filesystem),
            ))
        }
    }

    fn unit(path: &str, content: &[u8]) -> Unit {
        Unit::new(path, content.to_vec(), UnitOrigin::Filesystem)
    }

    #[tokio::test]
    async fn partial_passes_ineligible_through_unchanged() {
        let partial = Partial::for_extension(CaseShift, "js");
        let input = unit("README.md", b"hello");

        let forward = partial
            .to_server(&input, Encoding::Utf8)
            .await
            .unwrap()
            .into_unit()
            .unwrap();
        assert_eq!(forward, input);

        let reverse = partial
            .to_filesystem(&input, Encoding::Utf8)
            .await
            .unwrap()
            .into_unit()
            .unwrap();
        assert_eq!(reverse, input);
    }

    #[tokio::test]
    async fn partial_delegates_eligible_units() {
        let partial = Partial::for_extension(CaseShift, "js");
        let input = unit("Main.js", b"hello");

        let forward = partial
            .to_server(&input, Encoding::Utf8)
            .await
            .unwrap()
            .into_unit()
            .unwrap();

        assert_eq!(forward.path, input.path);
        assert_eq!(forward.content, b"HELLO");
    }

    #[tokio::test]
    async fn partial_with_custom_predicate() {
        let partial = Partial::new(CaseShift, |u: &Unit| u.path.as_str().starts_with("src/"));

        assert!(partial.is_eligible(&unit("src/a.js", b"")));
        assert!(!partial.is_eligible(&unit("docs/a.js", b"")));
    }

    #[tokio::test]
    async fn input_unit_is_never_mutated() {
        let partial = Partial::for_extension(CaseShift, "js");
        let input = unit("Main.js", b"hello");
        let before = input.clone();

        let _ = partial.to_server(&input, Encoding::Utf8).await.unwrap();
        let _ = partial.to_filesystem(&input, Encoding::Utf8).await.unwrap();

        assert_eq!(input, before);
    }

    #[tokio::test]
    async fn eligibility_predicate_matches_for_extension() {
        let partial = Partial::for_extension(CaseShift, "js");
        assert!(partial.is_eligible(&unit("Main.js", b"")));
        assert!(partial.is_eligible(&unit("Main.JS", b"")));
        assert!(!partial.is_eligible(&unit("Main.lua", b"")));
    }
}
