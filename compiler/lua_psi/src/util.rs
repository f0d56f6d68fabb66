//! Typed lookups over element trees.

use smallvec::SmallVec;

use crate::element::{LuaElement, PsiElement};

/// First immediate child of `element` castable to `T`.
pub fn child_of_type<'f, T: PsiElement<'f>>(element: &LuaElement<'f>) -> Option<T> {
    element
        .children()
        .filter(|child| T::can_cast(child.kind()))
        .find_map(T::cast)
}

/// All immediate children of `element` castable to `T`, in source order.
pub fn children_of_type<'f, T: PsiElement<'f>>(element: &LuaElement<'f>) -> SmallVec<[T; 2]> {
    element
        .children()
        .filter(|child| T::can_cast(child.kind()))
        .filter_map(T::cast)
        .collect()
}

/// Nearest strict ancestor of `element` castable to `T`.
pub fn parent_of_type<'f, T: PsiElement<'f>>(element: &LuaElement<'f>) -> Option<T> {
    std::iter::successors(element.parent(), LuaElement::parent).find_map(T::cast)
}

#[cfg(test)]
mod tests;
