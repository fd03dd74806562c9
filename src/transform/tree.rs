use slotmap::SlotMap;
use tracing::debug;

use super::{Space, Transformd};
use crate::error::{Result, TransformError};
use crate::matrix::Matrix4d;
use crate::quaternion::Quaterniond;
use crate::vector::Vector3d;

slotmap::new_key_type! {
    /// Handle to a node in a [`TransformTree`].
    pub struct TransformId;
}

#[derive(Debug, Clone)]
struct TransformNode {
    local: Transformd,
    parent: Option<TransformId>,
    children: Vec<TransformId>,
}

impl TransformNode {
    fn new(local: Transformd, parent: Option<TransformId>) -> Self {
        Self {
            local,
            parent,
            children: Vec::new(),
        }
    }
}

/// Arena owning a forest of transforms.
///
/// Each node stores only its local transform. World values are composed
/// root-first from the ancestor chain on every read, so a change to any
/// ancestor is visible to its descendants immediately.
#[derive(Debug, Default)]
pub struct TransformTree {
    nodes: SlotMap<TransformId, TransformNode>,
}

impl TransformTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: TransformId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Inserts a root node.
    pub fn insert(&mut self, local: Transformd) -> TransformId {
        let id = self.nodes.insert(TransformNode::new(local, None));
        debug!(?id, "inserted root transform");
        id
    }

    /// Inserts a node under `parent`.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `parent` is not in the tree.
    pub fn insert_child(&mut self, parent: TransformId, local: Transformd) -> Result<TransformId> {
        self.node(parent)?;
        let id = self.nodes.insert(TransformNode::new(local, Some(parent)));
        self.node_mut(parent)?.children.push(id);
        debug!(?id, ?parent, "inserted child transform");
        Ok(id)
    }

    /// Moves `child` under `parent`, or makes it a root when `parent` is
    /// `None`. The local transform is kept as-is.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` for unknown ids,
    /// `TransformError::SelfParent` if `parent == child` and
    /// `TransformError::Cycle` if `parent` is a descendant of `child`.
    pub fn set_parent(&mut self, child: TransformId, parent: Option<TransformId>) -> Result<()> {
        self.node(child)?;
        if let Some(parent) = parent {
            if parent == child {
                return Err(TransformError::SelfParent.into());
            }
            self.node(parent)?;
            if self.ancestors(parent).any(|ancestor| ancestor == child) {
                return Err(TransformError::Cycle.into());
            }
        }

        self.detach(child);
        if let Some(parent) = parent {
            self.node_mut(parent)?.children.push(child);
        }
        self.node_mut(child)?.parent = parent;
        debug!(?child, ?parent, "reparented transform");
        Ok(())
    }

    /// Removes `id` together with every descendant and returns the local
    /// transform of `id`.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn remove(&mut self, id: TransformId) -> Result<Transformd> {
        let local = self.node(id)?.local;
        self.detach(id);

        let mut pending = vec![id];
        let mut removed = 0usize;
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(next) {
                pending.extend(node.children);
                removed += 1;
            }
        }
        debug!(?id, removed, "removed transform subtree");
        Ok(local)
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn parent(&self, id: TransformId) -> Result<Option<TransformId>> {
        Ok(self.node(id)?.parent)
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn children(&self, id: TransformId) -> Result<&[TransformId]> {
        Ok(&self.node(id)?.children)
    }

    // --- Local frame ---

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn local(&self, id: TransformId) -> Result<Transformd> {
        Ok(self.node(id)?.local)
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn set_local(&mut self, id: TransformId, local: Transformd) -> Result<()> {
        self.node_mut(id)?.local = local;
        debug!(?id, "set local transform");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn set_local_position(&mut self, id: TransformId, position: Vector3d) -> Result<()> {
        self.node_mut(id)?.local.position = position;
        debug!(?id, %position, "set local position");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn set_local_rotation(&mut self, id: TransformId, rotation: Quaterniond) -> Result<()> {
        self.node_mut(id)?.local.rotation = rotation;
        debug!(?id, %rotation, "set local rotation");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn set_local_scale(&mut self, id: TransformId, scale: Vector3d) -> Result<()> {
        self.node_mut(id)?.local.scale = scale;
        debug!(?id, %scale, "set local scale");
        Ok(())
    }

    // --- World frame ---

    /// World transform of `id`, composed from the root down.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn world(&self, id: TransformId) -> Result<Transformd> {
        let mut chain = vec![self.node(id)?.local];
        chain.extend(self.ancestors(id).filter_map(|ancestor| {
            self.nodes.get(ancestor).map(|node| node.local)
        }));
        Ok(chain
            .iter()
            .rev()
            .fold(Transformd::IDENTITY, |world, local| world.then(local)))
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn position(&self, id: TransformId) -> Result<Vector3d> {
        Ok(self.world(id)?.position)
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn rotation(&self, id: TransformId) -> Result<Quaterniond> {
        Ok(self.world(id)?.rotation)
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn scale(&self, id: TransformId) -> Result<Vector3d> {
        Ok(self.world(id)?.scale)
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn matrix(&self, id: TransformId) -> Result<Matrix4d> {
        Ok(self.world(id)?.matrix())
    }

    /// Moves `id` so that its world position becomes `position`.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn set_position(&mut self, id: TransformId, position: Vector3d) -> Result<()> {
        let parent = self.parent_world(id)?;
        let local = (parent.rotation.inverse() * (position - parent.position))
            .component_divide(parent.scale);
        self.node_mut(id)?.local.position = local;
        debug!(?id, %position, "set world position");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn set_rotation(&mut self, id: TransformId, rotation: Quaterniond) -> Result<()> {
        let parent = self.parent_world(id)?;
        self.node_mut(id)?.local.rotation = parent.rotation.inverse() * rotation;
        debug!(?id, %rotation, "set world rotation");
        Ok(())
    }

    /// A zero parent scale component yields an infinite or NaN local scale.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn set_scale(&mut self, id: TransformId, scale: Vector3d) -> Result<()> {
        let parent = self.parent_world(id)?;
        self.node_mut(id)?.local.scale = scale.component_divide(parent.scale);
        debug!(?id, %scale, "set world scale");
        Ok(())
    }

    // --- Relative mutation ---

    /// Moves `id` by `translation`, expressed along its own axes or the
    /// world axes.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn translate(
        &mut self,
        id: TransformId,
        translation: Vector3d,
        space: Space,
    ) -> Result<()> {
        match space {
            Space::Local => {
                let local = &mut self.node_mut(id)?.local;
                local.position = local.position + local.rotation * translation;
                debug!(?id, %translation, "translated along local axes");
                Ok(())
            }
            Space::World => {
                let position = self.position(id)?;
                self.set_position(id, position + translation)
            }
        }
    }

    /// Rotates `id` by `degrees` about `axis`.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn rotate(
        &mut self,
        id: TransformId,
        axis: Vector3d,
        degrees: f64,
        space: Space,
    ) -> Result<()> {
        let delta = Quaterniond::axis_angle(axis, degrees);
        match space {
            Space::Local => self.rotate_by(id, delta),
            Space::World => {
                let rotation = self.rotation(id)?;
                self.set_rotation(id, delta * rotation)
            }
        }
    }

    /// Applies `delta` after the local rotation, about the node's own axes.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn rotate_by(&mut self, id: TransformId, delta: Quaterniond) -> Result<()> {
        let local = &mut self.node_mut(id)?.local;
        local.rotation = local.rotation * delta;
        debug!(?id, %delta, "rotated");
        Ok(())
    }

    /// Orbits `id` about the world-space line through `point` along `axis`,
    /// turning its orientation by the same amount.
    ///
    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn rotate_around(
        &mut self,
        id: TransformId,
        point: Vector3d,
        axis: Vector3d,
        degrees: f64,
    ) -> Result<()> {
        let delta = Quaterniond::axis_angle(axis, degrees);
        let world = self.world(id)?;
        self.set_position(id, point + delta * (world.position - point))?;
        self.set_rotation(id, delta * world.rotation)
    }

    // --- Directions ---

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn forward(&self, id: TransformId) -> Result<Vector3d> {
        self.direction(id, Vector3d::FORWARD)
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn back(&self, id: TransformId) -> Result<Vector3d> {
        self.direction(id, Vector3d::BACK)
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn right(&self, id: TransformId) -> Result<Vector3d> {
        self.direction(id, Vector3d::RIGHT)
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn left(&self, id: TransformId) -> Result<Vector3d> {
        self.direction(id, Vector3d::LEFT)
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn up(&self, id: TransformId) -> Result<Vector3d> {
        self.direction(id, Vector3d::UP)
    }

    /// # Errors
    ///
    /// Returns `TransformError::NodeNotFound` if `id` is not in the tree.
    pub fn down(&self, id: TransformId) -> Result<Vector3d> {
        self.direction(id, Vector3d::DOWN)
    }

    fn direction(&self, id: TransformId, axis: Vector3d) -> Result<Vector3d> {
        Ok(self.rotation(id)? * axis)
    }

    // --- Internals ---

    fn node(&self, id: TransformId) -> Result<&TransformNode> {
        self.nodes
            .get(id)
            .ok_or_else(|| TransformError::NodeNotFound(format!("{id:?}")).into())
    }

    fn node_mut(&mut self, id: TransformId) -> Result<&mut TransformNode> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| TransformError::NodeNotFound(format!("{id:?}")).into())
    }

    /// World transform of the parent of `id`, identity for a root.
    fn parent_world(&self, id: TransformId) -> Result<Transformd> {
        match self.node(id)?.parent {
            Some(parent) => self.world(parent),
            None => Ok(Transformd::IDENTITY),
        }
    }

    /// Ancestors of `id`, nearest first.
    fn ancestors(&self, id: TransformId) -> impl Iterator<Item = TransformId> + '_ {
        std::iter::successors(self.nodes.get(id).and_then(|node| node.parent), |ancestor| {
            self.nodes.get(*ancestor).and_then(|node| node.parent)
        })
    }

    /// Unlinks `id` from its parent's child list.
    fn detach(&mut self, id: TransformId) {
        let parent = self.nodes.get(id).and_then(|node| node.parent);
        if let Some(parent) = parent.and_then(|parent| self.nodes.get_mut(parent)) {
            parent.children.retain(|child| *child != id);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.parent = None;
        }
    }
}
