//! Property-based checks of stage and cascade semantics.
//!
//! # Properties Tested
//!
//! 1. **Determinism** - repeated application yields identical output
//! 2. **Alphabet closure** - every output re-segments into alphabet symbols
//! 3. **Pass-through** - symbols no alternative mentions are copied unchanged
//! 4. **Non-overlap** - a stage never rewrites more spans than fit in its input
//! 5. **Unsupported input** - text outside the alphabet is always rejected
