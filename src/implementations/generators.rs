//! Reusable generators for building domain generators.
//!
//! Domain-specific generators (organizations, meetings, permission
//! matrices) are supplied by callers; these cover the primitive shapes they
//! are usually composed from.

use std::marker::PhantomData;
use std::sync::Arc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::GeneratorError;
use crate::models::common::{ GeneratorConstraints, ShrinkMode };
use crate::traits::generator::PropertyGenerator;

/// Integers drawn uniformly from `[min, max)`, shrinking toward `origin`
pub struct IntRangeGenerator {
    id: String,
    min: i64,
    max: i64,
    origin: i64,
}

impl IntRangeGenerator {
    pub fn new(id: impl Into<String>, min: i64, max: i64) -> Self {
        Self { id: id.into(), min, max, origin: min }
    }

    /// Shrink toward `origin` instead of `min`
    pub fn with_origin(mut self, origin: i64) -> Self {
        self.origin = origin;
        self
    }
}

/// Candidates between `value` and `origin`, most reduced first.
///
/// Distances are taken as `u64` and stepped in `i128`, so ranges wider than
/// `i64::MAX` shrink without overflow.
pub fn integer_candidates(value: i64, origin: i64, mode: ShrinkMode) -> Vec<i64> {
    if value == origin {
        return Vec::new();
    }
    let toward: i128 = if value > origin { -1 } else { 1 };
    let step = |distance: u64| i64::try_from(i128::from(value) + toward * i128::from(distance)).ok();
    match mode {
        ShrinkMode::Minimal => vec![origin],
        ShrinkMode::Linear => step(1).into_iter().collect(),
        ShrinkMode::Binary => {
            let mut candidates = vec![origin];
            let mut distance = value.abs_diff(origin) / 2;
            while distance > 0 {
                candidates.extend(step(distance));
                distance /= 2;
            }
            if let Some(adjacent) = step(1) {
                if candidates.last() != Some(&adjacent) {
                    candidates.push(adjacent);
                }
            }
            candidates.dedup();
            candidates
        }
    }
}

impl PropertyGenerator<i64> for IntRangeGenerator {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_tag(&self) -> &str {
        "integer"
    }

    fn generate(&self, rng: &mut StdRng) -> Result<i64, GeneratorError> {
        if self.min >= self.max {
            return Err(GeneratorError::new(format!("empty range [{}, {})", self.min, self.max)));
        }
        Ok(rng.gen_range(self.min..self.max))
    }

    fn shrink(&self, value: &i64, mode: ShrinkMode) -> Option<Vec<i64>> {
        Some(integer_candidates(*value, self.origin, mode))
    }

    fn constraints(&self) -> Option<GeneratorConstraints> {
        Some(GeneratorConstraints {
            range: Some((self.min as f64, self.max as f64)),
            ..GeneratorConstraints::default()
        })
    }

    fn is_edge_case(&self, value: &i64) -> bool {
        *value == self.min || Some(*value) == self.max.checked_sub(1) || *value == self.origin
    }
}

/// Picks one of a fixed list of values; earlier entries count as simpler
pub struct OneOfGenerator<T> {
    id: String,
    type_tag: String,
    values: Vec<T>,
}

impl<T: Clone> OneOfGenerator<T> {
    pub fn new(id: impl Into<String>, type_tag: impl Into<String>, values: Vec<T>) -> Self {
        Self { id: id.into(), type_tag: type_tag.into(), values }
    }
}

impl<T: Clone + PartialEq + Send + Sync> PropertyGenerator<T> for OneOfGenerator<T> {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn generate(&self, rng: &mut StdRng) -> Result<T, GeneratorError> {
        self.values
            .choose(rng)
            .cloned()
            .ok_or_else(|| GeneratorError::new(format!("generator '{}' has no values", self.id)))
    }

    fn shrink(&self, value: &T, mode: ShrinkMode) -> Option<Vec<T>> {
        let position = self.values.iter().position(|candidate| candidate == value)?;
        let simpler = &self.values[..position];
        Some(match mode {
            ShrinkMode::Minimal => simpler.first().cloned().into_iter().collect(),
            ShrinkMode::Linear => simpler.last().cloned().into_iter().collect(),
            ShrinkMode::Binary => simpler.to_vec(),
        })
    }

    fn is_edge_case(&self, value: &T) -> bool {
        self.values.first() == Some(value) || self.values.last() == Some(value)
    }
}

/// Strings over an alphabet with a length in `min_len..=max_len`
pub struct StringGenerator {
    id: String,
    alphabet: Vec<char>,
    min_len: usize,
    max_len: usize,
}

impl StringGenerator {
    pub fn new(id: impl Into<String>, alphabet: &str, min_len: usize, max_len: usize) -> Self {
        Self { id: id.into(), alphabet: alphabet.chars().collect(), min_len, max_len }
    }

    pub fn alphanumeric(id: impl Into<String>, min_len: usize, max_len: usize) -> Self {
        Self::new(id, "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789", min_len, max_len)
    }
}

impl PropertyGenerator<String> for StringGenerator {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_tag(&self) -> &str {
        "string"
    }

    fn generate(&self, rng: &mut StdRng) -> Result<String, GeneratorError> {
        if self.alphabet.is_empty() || self.min_len > self.max_len {
            return Err(GeneratorError::new(format!("generator '{}' is misconfigured", self.id)));
        }
        let len = rng.gen_range(self.min_len..=self.max_len);
        Ok((0..len).filter_map(|_| self.alphabet.choose(&mut *rng).copied()).collect())
    }

    fn shrink(&self, value: &String, mode: ShrinkMode) -> Option<Vec<String>> {
        let chars: Vec<char> = value.chars().collect();
        let simplest = self.alphabet.first().copied();
        let mut candidates: Vec<String> = shorter_lengths(chars.len(), self.min_len, mode)
            .into_iter()
            .map(|len| chars[..len].iter().collect())
            .collect();

        // Same length, first differing character replaced by the simplest one
        if let Some(simplest) = simplest {
            if let Some(index) = chars.iter().position(|c| *c != simplest) {
                let mut replaced = chars.clone();
                replaced[index] = simplest;
                candidates.push(replaced.into_iter().collect());
            }
        }
        Some(candidates)
    }

    fn constraints(&self) -> Option<GeneratorConstraints> {
        Some(GeneratorConstraints {
            length: Some((self.min_len, self.max_len)),
            pattern: Some(format!("[{}]*", self.alphabet.iter().collect::<String>())),
            ..GeneratorConstraints::default()
        })
    }

    fn is_edge_case(&self, value: &String) -> bool {
        let len = value.chars().count();
        len == self.min_len || len == self.max_len
    }
}

/// Truncation lengths between `len` and `min_len`, shortest first
fn shorter_lengths(len: usize, min_len: usize, mode: ShrinkMode) -> Vec<usize> {
    if len <= min_len {
        return Vec::new();
    }
    match mode {
        ShrinkMode::Minimal => vec![min_len],
        ShrinkMode::Linear => vec![len - 1],
        ShrinkMode::Binary => {
            let mut lengths = vec![min_len];
            let half = min_len + (len - min_len) / 2;
            if half > min_len {
                lengths.push(half);
            }
            if len - 1 > half {
                lengths.push(len - 1);
            }
            lengths
        }
    }
}

/// Vectors whose elements come from a sub-generator
pub struct VecGenerator<T> {
    id: String,
    element: Arc<dyn PropertyGenerator<T>>,
    min_len: usize,
    max_len: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> VecGenerator<T> {
    pub fn new(
        id: impl Into<String>,
        element: Arc<dyn PropertyGenerator<T>>,
        min_len: usize,
        max_len: usize
    ) -> Self {
        Self { id: id.into(), element, min_len, max_len, _marker: PhantomData }
    }
}

impl<T: Clone + Send + Sync> PropertyGenerator<Vec<T>> for VecGenerator<T> {
    fn id(&self) -> &str {
        &self.id
    }

    fn type_tag(&self) -> &str {
        "list"
    }

    fn generate(&self, rng: &mut StdRng) -> Result<Vec<T>, GeneratorError> {
        if self.min_len > self.max_len {
            return Err(GeneratorError::new(format!("generator '{}' has an empty length range", self.id)));
        }
        let len = rng.gen_range(self.min_len..=self.max_len);
        (0..len).map(|_| self.element.generate(rng)).collect()
    }

    fn shrink(&self, value: &Vec<T>, mode: ShrinkMode) -> Option<Vec<Vec<T>>> {
        let mut candidates: Vec<Vec<T>> = shorter_lengths(value.len(), self.min_len, mode)
            .into_iter()
            .map(|len| value[..len].to_vec())
            .collect();

        if value.len() > self.min_len {
            for index in 0..value.len() {
                let mut removed = value.clone();
                removed.remove(index);
                candidates.push(removed);
            }
        }

        for (index, item) in value.iter().enumerate() {
            for smaller in self.element.shrink(item, mode).unwrap_or_default() {
                let mut replaced = value.clone();
                replaced[index] = smaller;
                candidates.push(replaced);
            }
        }
        Some(candidates)
    }

    fn constraints(&self) -> Option<GeneratorConstraints> {
        Some(GeneratorConstraints {
            length: Some((self.min_len, self.max_len)),
            custom: Some(format!("elements from '{}'", self.element.id())),
            ..GeneratorConstraints::default()
        })
    }

    fn is_edge_case(&self, value: &Vec<T>) -> bool {
        value.len() == self.min_len || value.len() == self.max_len
    }
}

/// Generator backed by a closure; declares no shrink behaviour
pub struct FnGenerator<T, F> {
    id: String,
    type_tag: String,
    generate: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> FnGenerator<T, F> where F: Fn(&mut StdRng) -> Result<T, GeneratorError> + Send + Sync {
    pub fn new(id: impl Into<String>, type_tag: impl Into<String>, generate: F) -> Self {
        Self { id: id.into(), type_tag: type_tag.into(), generate, _marker: PhantomData }
    }
}

impl<T, F> PropertyGenerator<T>
    for FnGenerator<T, F>
    where F: Fn(&mut StdRng) -> Result<T, GeneratorError> + Send + Sync
{
    fn id(&self) -> &str {
        &self.id
    }

    fn type_tag(&self) -> &str {
        &self.type_tag
    }

    fn generate(&self, rng: &mut StdRng) -> Result<T, GeneratorError> {
        (self.generate)(rng)
    }
}
