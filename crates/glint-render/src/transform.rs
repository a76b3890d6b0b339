//! Hierarchical 3D transforms.
//!
//! A [`Transform`] holds an origin, position, rotation and scale, plus a weak
//! link to a parent transform. World-space values are computed on demand by
//! walking the parent chain to the root:
//!
//! - origin, position and Euler rotation add up the chain
//! - scale multiplies up the chain
//!
//! Rotation can also be given as a quaternion. Once
//! [`set_rotation_quat`](Transform::set_rotation_quat) has been called the
//! world matrix uses the quaternion from then on, even if an Euler rotation is
//! set afterwards.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use glint_render::{Transform, Vec3};
//!
//! let parent = Arc::new(Transform::new());
//! parent.set_position(Vec3::new(1.0, 0.0, 0.0));
//!
//! let child = Transform::new();
//! child.set_parent(Some(&parent));
//! child.set_position(Vec3::new(0.5, 0.5, 0.0));
//!
//! assert_eq!(child.world_position(), Vec3::new(1.5, 0.5, 0.0));
//! ```
//!
//! The parent chain must be acyclic. This is not checked; a cycle makes every
//! world getter recurse forever.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::types::{EulerRot, Mat4, Quat, Vec3};

#[derive(Debug, Clone, Copy)]
struct TransformState {
    origin: Vec3,
    position: Vec3,
    rotation: Vec3,
    rotation_quat: Quat,
    rotation_quat_set: bool,
    scale: Vec3,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            rotation_quat: Quat::IDENTITY,
            rotation_quat_set: false,
            scale: Vec3::ONE,
        }
    }
}

/// Position, rotation, scale and origin with an optional parent.
///
/// All setters take a short internal lock and can be called from any thread.
/// The parent link is weak: a transform never keeps its parent alive, and a
/// dropped parent behaves like no parent.
#[derive(Debug, Default)]
pub struct Transform {
    state: Mutex<TransformState>,
    parent: RwLock<Option<Weak<Transform>>>,
}

impl Transform {
    /// Create an identity transform with no parent.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Parent
    // =========================================================================

    /// Set or clear the parent transform.
    pub fn set_parent(&self, parent: Option<&Arc<Transform>>) {
        *self.parent.write() = parent.map(Arc::downgrade);
    }

    /// The parent transform, if set and still alive.
    pub fn parent(&self) -> Option<Arc<Transform>> {
        self.parent.read().as_ref().and_then(Weak::upgrade)
    }

    // =========================================================================
    // Local values
    // =========================================================================

    pub fn origin(&self) -> Vec3 {
        self.state.lock().origin
    }

    pub fn set_origin(&self, origin: Vec3) {
        self.state.lock().origin = origin;
    }

    pub fn position(&self) -> Vec3 {
        self.state.lock().position
    }

    pub fn set_position(&self, position: Vec3) {
        self.state.lock().position = position;
    }

    /// Euler rotation in radians (XYZ order).
    pub fn rotation(&self) -> Vec3 {
        self.state.lock().rotation
    }

    pub fn set_rotation(&self, rotation: Vec3) {
        self.state.lock().rotation = rotation;
    }

    pub fn rotation_quat(&self) -> Quat {
        self.state.lock().rotation_quat
    }

    /// Set a quaternion rotation.
    ///
    /// From this call on the world matrix rotates by the quaternion, whatever
    /// Euler rotation is set later.
    pub fn set_rotation_quat(&self, rotation: Quat) {
        let mut state = self.state.lock();
        state.rotation_quat = rotation;
        state.rotation_quat_set = true;
    }

    /// Whether a quaternion rotation has ever been set.
    pub fn uses_rotation_quat(&self) -> bool {
        self.state.lock().rotation_quat_set
    }

    pub fn scale(&self) -> Vec3 {
        self.state.lock().scale
    }

    pub fn set_scale(&self, scale: Vec3) {
        self.state.lock().scale = scale;
    }

    // =========================================================================
    // World values
    // =========================================================================

    pub fn world_origin(&self) -> Vec3 {
        let local = self.origin();
        match self.parent() {
            Some(parent) => local + parent.world_origin(),
            None => local,
        }
    }

    pub fn world_position(&self) -> Vec3 {
        let local = self.position();
        match self.parent() {
            Some(parent) => local + parent.world_position(),
            None => local,
        }
    }

    pub fn world_rotation(&self) -> Vec3 {
        let local = self.rotation();
        match self.parent() {
            Some(parent) => local + parent.world_rotation(),
            None => local,
        }
    }

    pub fn world_scale(&self) -> Vec3 {
        let local = self.scale();
        match self.parent() {
            Some(parent) => local * parent.world_scale(),
            None => local,
        }
    }

    /// `Translate(world position) * Rotate * Scale(world scale)`.
    pub fn world_matrix(&self) -> Mat4 {
        let state = *self.state.lock();
        let rotation = if state.rotation_quat_set {
            state.rotation_quat
        } else {
            let r = self.world_rotation();
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z)
        };
        Mat4::from_scale_rotation_translation(self.world_scale(), rotation, self.world_position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Mat4, b: Mat4) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn test_identity_defaults() {
        let t = Transform::new();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.scale(), Vec3::ONE);
        assert_eq!(t.world_scale(), Vec3::ONE);
        assert!(approx(t.world_matrix(), Mat4::IDENTITY));
    }

    #[test]
    fn test_world_values_compose() {
        let root = Arc::new(Transform::new());
        root.set_position(Vec3::new(1.0, 2.0, 0.0));
        root.set_rotation(Vec3::new(0.0, 0.0, 0.5));
        root.set_scale(Vec3::new(2.0, 2.0, 1.0));
        root.set_origin(Vec3::new(0.1, 0.0, 0.0));

        let mid = Arc::new(Transform::new());
        mid.set_parent(Some(&root));
        mid.set_position(Vec3::new(0.5, 0.0, 0.0));
        mid.set_scale(Vec3::new(0.5, 0.25, 1.0));

        let leaf = Transform::new();
        leaf.set_parent(Some(&mid));
        leaf.set_rotation(Vec3::new(0.0, 0.0, 0.25));

        assert_eq!(mid.world_position(), Vec3::new(1.5, 2.0, 0.0));
        assert_eq!(leaf.world_position(), Vec3::new(1.5, 2.0, 0.0));
        assert_eq!(leaf.world_scale(), Vec3::new(1.0, 0.5, 1.0));
        assert_eq!(leaf.world_rotation(), Vec3::new(0.0, 0.0, 0.75));
        assert_eq!(leaf.world_origin(), Vec3::new(0.1, 0.0, 0.0));
    }

    #[test]
    fn test_dropped_parent_is_no_parent() {
        let child = Transform::new();
        {
            let parent = Arc::new(Transform::new());
            parent.set_position(Vec3::ONE);
            child.set_parent(Some(&parent));
            assert_eq!(child.world_position(), Vec3::ONE);
        }
        assert!(child.parent().is_none());
        assert_eq!(child.world_position(), Vec3::ZERO);
    }

    #[test]
    fn test_quaternion_is_sticky() {
        let t = Transform::new();
        let quat = Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
        t.set_rotation_quat(quat);
        t.set_rotation(Vec3::new(0.0, 0.0, 1.0));

        assert!(t.uses_rotation_quat());
        let expected = Mat4::from_quat(quat);
        assert!(approx(t.world_matrix(), expected));
    }

    #[test]
    fn test_world_matrix_euler() {
        let t = Transform::new();
        t.set_position(Vec3::new(1.0, 0.0, 0.0));
        t.set_rotation(Vec3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2));
        t.set_scale(Vec3::new(2.0, 2.0, 2.0));

        let expected = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0))
            * Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2)
            * Mat4::from_scale(Vec3::splat(2.0));
        assert!(approx(t.world_matrix(), expected));
    }
}
