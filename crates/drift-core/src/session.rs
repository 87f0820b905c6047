//! The single context object threaded through every interaction.

use crate::camera::{Camera, OrbitControls};
use crate::constants::NEIGHBOR_COUNT;
use crate::drift::{Drift, GroupRotation};
use crate::field::{generate_clusters, Cluster};
use crate::overlay::{
    plan_overlay, ConnectorLink, Motion, NodeFrame, NodeId, NodeIds, OverlayId, OverlayPlan,
    OverlayTick, PlanRequest,
};
use crate::params::{ConfigError, SceneParams};
use crate::picking::{is_click, nearest_neighbors, pick_at, Pick};
use crate::tasks::TaskSet;
use crate::transition::{CameraPhase, CameraTransition};
use crate::view::{Rect, Viewport};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Result of a pointer release.
#[derive(Clone, Debug)]
pub enum PointerOutcome {
    /// Release without a recorded press.
    NoPress,
    /// An overlay is already showing; picking is suspended.
    OverlayActive,
    /// The pointer travelled further than the drag threshold.
    Dragged,
    /// A click that hit no particle.
    Missed,
    Opened(OverlayPlan),
}

/// Nodes to tear down after a dismissal.
#[derive(Clone, Debug, PartialEq)]
pub struct Dismissal {
    pub overlay: OverlayId,
    pub nodes: Vec<NodeId>,
}

struct ActiveOverlay {
    id: OverlayId,
    pick: Pick,
    primary: NodeId,
    nodes: Vec<NodeId>,
    opened_at_ms: f64,
    // user pause flags from before the overlay took them over
    animation_was_paused: bool,
    rotation_was_paused: bool,
}

pub struct Session {
    params: SceneParams,
    rng: StdRng,
    clusters: Vec<Cluster>,
    drift: Drift,
    rotation: GroupRotation,
    camera: Camera,
    orbit: OrbitControls,
    transition: CameraTransition,
    viewport: Viewport,
    press: Option<Vec2>,
    last_pointer: Option<Vec2>,
    overlay: Option<ActiveOverlay>,
    motions: TaskSet<OverlayId, Motion>,
    node_ids: NodeIds,
    next_overlay: u32,
    animation_paused: bool,
    rotation_paused: bool,
    frames: u64,
}

impl Session {
    pub fn new(params: SceneParams, viewport: Viewport, seed: u64) -> Result<Self, ConfigError> {
        params.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let clusters = generate_clusters(
            &params.cluster_centers,
            params.points_per_cluster,
            params.cluster_radius,
            params.drift_speed,
            &params.cluster_colors,
            &mut rng,
        );
        let camera = Camera::new(params.camera_home, viewport.aspect());
        let orbit = OrbitControls::new(camera.eye, camera.target);
        log::info!(
            "[session] clusters={} points/cluster={} seed={}",
            clusters.len(),
            params.points_per_cluster,
            seed
        );
        Ok(Self {
            drift: Drift::new(params.drift_speed, params.containment_damping),
            transition: CameraTransition::new(params.camera_home, params.zoom_step),
            params,
            rng,
            clusters,
            rotation: GroupRotation::default(),
            camera,
            orbit,
            viewport,
            press: None,
            last_pointer: None,
            overlay: None,
            motions: TaskSet::new(),
            node_ids: NodeIds::default(),
            next_overlay: 0,
            animation_paused: false,
            rotation_paused: false,
            frames: 0,
        })
    }

    // ---------------- accessors ----------------

    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn clusters_mut(&mut self) -> &mut [Cluster] {
        &mut self.clusters
    }

    pub fn rotation(&self) -> GroupRotation {
        self.rotation
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    pub fn transition(&self) -> &CameraTransition {
        &self.transition
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_overlay_open(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn selected(&self) -> Option<Pick> {
        self.overlay.as_ref().map(|o| o.pick)
    }

    pub fn is_animation_paused(&self) -> bool {
        self.animation_paused
    }

    pub fn is_rotation_paused(&self) -> bool {
        self.rotation_paused
    }

    pub fn set_animation_paused(&mut self, paused: bool) {
        self.animation_paused = paused;
    }

    pub fn set_rotation_paused(&mut self, paused: bool) {
        self.rotation_paused = paused;
    }

    /// Number of overlay animation tasks still stored.
    pub fn task_count(&self) -> usize {
        self.motions.len()
    }

    // ---------------- frame ----------------

    /// One master-loop frame: drift, group rotation, camera, overlay tasks.
    pub fn tick(&mut self) {
        if !self.animation_paused || self.transition.is_zooming() {
            self.drift.step(&mut self.clusters, &mut self.rng);
        }
        if !self.rotation_paused {
            self.rotation.advance(self.params.rotation_speed);
        }
        let was = self.transition.phase();
        self.transition.step(&mut self.camera);
        match (was, self.transition.phase()) {
            (CameraPhase::ZoomingOut, CameraPhase::Idle) => {
                self.orbit.sync_from_eye(self.camera.eye);
            }
            _ => {
                if self.transition.is_free() && self.orbit.enabled {
                    self.orbit.apply(&mut self.camera);
                }
            }
        }
        self.motions.tick(&OverlayTick {
            viewport: self.viewport,
        });
        self.frames += 1;
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
    }

    /// Placement of every live overlay node for this frame.
    pub fn overlay_frames(&self) -> Vec<NodeFrame> {
        self.motions.iter().map(|(_, m)| m.frame()).collect()
    }

    /// Dot-to-video connectors that must be redrawn this frame.
    pub fn connectors(&self) -> Vec<ConnectorLink> {
        self.motions.iter().filter_map(|(_, m)| m.link).collect()
    }

    /// Model-side bounds of the primary card.
    pub fn primary_bounds(&self) -> Option<Rect> {
        let o = self.overlay.as_ref()?;
        self.motions
            .owned_by(o.id)
            .find(|m| m.node == o.primary)
            .map(|m| m.rect())
    }

    // ---------------- input ----------------

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.press = Some(pos);
        self.last_pointer = Some(pos);
    }

    /// Orbits the camera while a press is active.
    pub fn pointer_move(&mut self, pos: Vec2) {
        if self.press.is_none() {
            return;
        }
        if let Some(prev) = self.last_pointer.replace(pos) {
            if self.transition.is_free() {
                self.orbit.rotate(pos - prev, self.viewport);
            }
        }
    }

    pub fn wheel(&mut self, delta_y: f32) {
        if self.transition.is_free() {
            self.orbit.dolly(delta_y);
        }
    }

    /// Handles a release: filters drags, picks, and opens an overlay on a hit.
    pub fn pointer_up(&mut self, pos: Vec2, now_ms: f64) -> PointerOutcome {
        self.last_pointer = None;
        let Some(press) = self.press.take() else {
            return PointerOutcome::NoPress;
        };
        if self.overlay.is_some() {
            return PointerOutcome::OverlayActive;
        }
        if !is_click(press, pos, self.params.drag_threshold_px) {
            log::debug!("[pick] drag of {:.1}px ignored", press.distance(pos));
            return PointerOutcome::Dragged;
        }
        let hit = pick_at(
            &self.camera,
            pos,
            self.viewport,
            &self.clusters,
            &self.rotation,
            self.params.pick_threshold,
        );
        match hit {
            Some(hit) => PointerOutcome::Opened(self.open_overlay(hit, pos, now_ms)),
            None => PointerOutcome::Missed,
        }
    }

    fn open_overlay(&mut self, hit: Pick, click: Vec2, now_ms: f64) -> OverlayPlan {
        let cluster = &self.clusters[hit.cluster];
        let neighbor_screens: Vec<Option<Vec2>> =
            nearest_neighbors(cluster, hit.index, NEIGHBOR_COUNT)
                .into_iter()
                .map(|i| {
                    let world = self.rotation.apply(cluster.positions()[i]);
                    self.camera.world_to_screen(world, self.viewport)
                })
                .collect();
        let id = OverlayId(self.next_overlay);
        self.next_overlay += 1;
        let req = PlanRequest {
            id,
            cluster: hit.cluster,
            index: hit.index,
            click,
            viewport: self.viewport,
            color: cluster.color,
            catalog_len: self.params.catalog_len,
            neighbor_screens: &neighbor_screens,
        };
        let animation_was_paused = self.animation_paused;
        let rotation_was_paused = self.rotation_paused;
        let (plan, motions) = plan_overlay(&req, &mut self.node_ids, &mut self.rng);
        for m in motions {
            self.motions.spawn(id, m);
        }

        self.rotation_paused = true;
        self.animation_paused = true;
        self.orbit.enabled = false;
        self.transition.zoom_in(self.camera.eye, hit.point, self.params.zoom_offset);

        log::info!(
            "[pick] cluster={} index={} dist={:.3} video={} related={}",
            hit.cluster,
            hit.index,
            hit.distance,
            plan.primary.asset.0,
            plan.related.len()
        );
        self.overlay = Some(ActiveOverlay {
            id,
            pick: hit,
            primary: plan.primary.node,
            nodes: plan.nodes(),
            opened_at_ms: now_ms,
            animation_was_paused,
            rotation_was_paused,
        });
        plan
    }

    /// Dismisses the overlay when a click lands outside the primary card,
    /// once the arm delay has passed since the overlay opened.
    pub fn click_outside(
        &mut self,
        pos: Vec2,
        primary_bounds: Rect,
        now_ms: f64,
    ) -> Option<Dismissal> {
        let o = self.overlay.as_ref()?;
        if now_ms - o.opened_at_ms < self.params.dismiss_arm_delay_ms {
            return None;
        }
        if primary_bounds.contains(pos) {
            return None;
        }
        self.dismiss()
    }

    /// Tears the overlay down unconditionally. Pause flags go back to what
    /// the user had set before the pick.
    pub fn dismiss(&mut self) -> Option<Dismissal> {
        let o = self.overlay.take()?;
        let cancelled = self.motions.cancel_owner(o.id);
        self.transition.zoom_out(self.orbit.target);
        self.rotation_paused = o.rotation_was_paused;
        self.animation_paused = o.animation_was_paused;
        self.orbit.enabled = true;
        log::info!(
            "[overlay] dismissed {:?}: {} nodes, {} tasks",
            o.id,
            o.nodes.len(),
            cancelled
        );
        Some(Dismissal {
            overlay: o.id,
            nodes: o.nodes,
        })
    }
}
