//! Type descriptors and operator slots.
//!
//! A [`TypeDescriptor`] identifies a kind of value by identity and carries the
//! optional capabilities the dispatcher consults:
//!
//! - `floor_divide`: the `//` implementation for the modern slot protocol
//! - `coerce`: the legacy coercion primitive
//! - `truth`: truthiness of values of this type
//!
//! Descriptors are immutable once built and shared through [`TypeRef`].

use std::fmt;
use std::ptr;
use std::sync::Arc;

use crate::error::ArithmeticResult;
use crate::kind::ExactKind;
use crate::value::Value;

/// Shared handle to a type descriptor. Identity is pointer identity.
pub type TypeRef = Arc<TypeDescriptor>;

/// Outcome of invoking a floor-division slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotOutcome {
    /// The slot computed a result
    Produced(Value),
    /// The slot does not handle this operand combination
    NotApplicable,
}

/// Outcome of invoking a legacy coercion slot.
#[derive(Debug, Clone, PartialEq)]
pub enum CoerceOutcome {
    /// Both operands were converted to a common representation.
    /// The first value corresponds to the coercing type's own operand.
    Coerced(Value, Value),
    /// The coercion does not handle this operand combination
    NotApplicable,
}

type FloorDivFn = dyn Fn(&Value, &Value) -> ArithmeticResult<SlotOutcome> + Send + Sync;
type CoerceFn = dyn Fn(&Value, &Value) -> ArithmeticResult<CoerceOutcome> + Send + Sync;
type TruthFn = dyn Fn(&Value) -> ArithmeticResult<bool> + Send + Sync;

/// A floor-division implementation.
///
/// Two slots are the same implementation iff they share one allocation, so
/// cloning a slot (or inheriting it from a base type) keeps its identity.
#[derive(Clone)]
pub struct FloorDivSlot(Arc<FloorDivFn>);

impl FloorDivSlot {
    /// Wrap a function as a slot
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> ArithmeticResult<SlotOutcome> + Send + Sync + 'static,
    {
        FloorDivSlot(Arc::new(f))
    }

    /// Invoke the slot
    #[inline]
    pub fn call(&self, a: &Value, b: &Value) -> ArithmeticResult<SlotOutcome> {
        (self.0)(a, b)
    }

    /// Check whether both slots are the same underlying implementation
    pub fn same_impl(&self, other: &FloorDivSlot) -> bool {
        ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl fmt::Debug for FloorDivSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FloorDivSlot({:p})", Arc::as_ptr(&self.0))
    }
}

/// A legacy coercion primitive.
#[derive(Clone)]
pub struct CoerceSlot(Arc<CoerceFn>);

impl CoerceSlot {
    /// Wrap a function as a coercion slot
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> ArithmeticResult<CoerceOutcome> + Send + Sync + 'static,
    {
        CoerceSlot(Arc::new(f))
    }

    /// Invoke the coercion with the owning type's operand first
    #[inline]
    pub fn call(&self, own: &Value, other: &Value) -> ArithmeticResult<CoerceOutcome> {
        (self.0)(own, other)
    }
}

impl fmt::Debug for CoerceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CoerceSlot({:p})", Arc::as_ptr(&self.0))
    }
}

/// Truthiness of values of a type.
#[derive(Clone)]
pub struct TruthSlot(Arc<TruthFn>);

impl TruthSlot {
    /// Wrap a function as a truth slot
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> ArithmeticResult<bool> + Send + Sync + 'static,
    {
        TruthSlot(Arc::new(f))
    }

    /// Invoke the slot
    #[inline]
    pub fn call(&self, value: &Value) -> ArithmeticResult<bool> {
        (self.0)(value)
    }
}

impl fmt::Debug for TruthSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TruthSlot({:p})", Arc::as_ptr(&self.0))
    }
}

/// Runtime description of a value's type.
pub struct TypeDescriptor {
    name: String,
    base: Option<TypeRef>,
    new_style: bool,
    exact_kind: Option<ExactKind>,
    floor_divide: Option<FloorDivSlot>,
    coerce: Option<CoerceSlot>,
    truth: Option<TruthSlot>,
}

impl TypeDescriptor {
    /// Start building a descriptor with the given display name
    pub fn builder<S: Into<String>>(name: S) -> TypeBuilder {
        TypeBuilder::new(name)
    }

    /// Display name used in error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct base type, if any
    pub fn base(&self) -> Option<&TypeRef> {
        self.base.as_ref()
    }

    /// Whether this type takes part in the modern slot protocol
    pub fn is_new_style(&self) -> bool {
        self.new_style
    }

    /// The built-in kind this descriptor *is*, not inherited
    pub fn exact_kind(&self) -> Option<ExactKind> {
        self.exact_kind
    }

    /// The built-in kind this descriptor is or derives from
    pub fn numeric_kind(&self) -> Option<ExactKind> {
        self.ancestors().find_map(|t| t.exact_kind)
    }

    /// Floor-division slot
    pub fn floor_divide(&self) -> Option<&FloorDivSlot> {
        self.floor_divide.as_ref()
    }

    /// Legacy coercion slot
    pub fn coerce(&self) -> Option<&CoerceSlot> {
        self.coerce.as_ref()
    }

    /// Truth slot
    pub fn truth(&self) -> Option<&TruthSlot> {
        self.truth.as_ref()
    }

    /// Check if `self` is `other` or derives from it
    pub fn is_subtype_of(&self, other: &TypeDescriptor) -> bool {
        self.ancestors().any(|t| ptr::eq(t, other))
    }

    /// Check if `self` derives from `other` without being it
    pub fn is_proper_subtype_of(&self, other: &TypeDescriptor) -> bool {
        !ptr::eq(self, other) && self.is_subtype_of(other)
    }

    /// Iterate over `self` and then each base in turn
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("base", &self.base.as_ref().map(|b| b.name()))
            .field("new_style", &self.new_style)
            .field("exact_kind", &self.exact_kind)
            .field("floor_divide", &self.floor_divide.is_some())
            .field("coerce", &self.coerce.is_some())
            .field("truth", &self.truth.is_some())
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Iterator over a descriptor and its bases
#[derive(Debug)]
pub struct Ancestors<'a> {
    next: Option<&'a TypeDescriptor>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TypeDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base.as_deref();
        Some(current)
    }
}

/// Builder for [`TypeDescriptor`].
///
/// Slots left unset are inherited from the base type, so a subtype that does
/// not override `//` shares its base's implementation.
#[derive(Debug)]
pub struct TypeBuilder {
    name: String,
    base: Option<TypeRef>,
    new_style: bool,
    exact_kind: Option<ExactKind>,
    floor_divide: Option<FloorDivSlot>,
    coerce: Option<CoerceSlot>,
    truth: Option<TruthSlot>,
}

impl TypeBuilder {
    fn new<S: Into<String>>(name: S) -> Self {
        TypeBuilder {
            name: name.into(),
            base: None,
            new_style: true,
            exact_kind: None,
            floor_divide: None,
            coerce: None,
            truth: None,
        }
    }

    /// Derive from `base`
    pub fn base(mut self, base: &TypeRef) -> Self {
        self.base = Some(Arc::clone(base));
        self
    }

    /// Mark the type as taking part only in the legacy coercion protocol
    pub fn legacy(mut self) -> Self {
        self.new_style = false;
        self
    }

    /// Set the floor-division slot
    pub fn floor_divide(mut self, slot: FloorDivSlot) -> Self {
        self.floor_divide = Some(slot);
        self
    }

    /// Set the floor-division slot from a function
    pub fn floor_divide_fn<F>(self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> ArithmeticResult<SlotOutcome> + Send + Sync + 'static,
    {
        self.floor_divide(FloorDivSlot::new(f))
    }

    /// Set the legacy coercion slot
    pub fn coerce(mut self, slot: CoerceSlot) -> Self {
        self.coerce = Some(slot);
        self
    }

    /// Set the legacy coercion slot from a function
    pub fn coerce_fn<F>(self, f: F) -> Self
    where
        F: Fn(&Value, &Value) -> ArithmeticResult<CoerceOutcome> + Send + Sync + 'static,
    {
        self.coerce(CoerceSlot::new(f))
    }

    /// Set the truth slot from a function
    pub fn truth_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> ArithmeticResult<bool> + Send + Sync + 'static,
    {
        self.truth = Some(TruthSlot::new(f));
        self
    }

    pub(crate) fn exact_kind(mut self, kind: ExactKind) -> Self {
        self.exact_kind = Some(kind);
        self
    }

    /// Finish the descriptor
    pub fn build(self) -> TypeRef {
        let inherited = self.base.as_deref();
        Arc::new(TypeDescriptor {
            floor_divide: self
                .floor_divide
                .or_else(|| inherited.and_then(|b| b.floor_divide.clone())),
            coerce: self
                .coerce
                .or_else(|| inherited.and_then(|b| b.coerce.clone())),
            truth: self.truth.or_else(|| inherited.and_then(|b| b.truth.clone())),
            name: self.name,
            base: self.base,
            new_style: self.new_style,
            exact_kind: self.exact_kind,
        })
    }
}
