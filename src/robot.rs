//! Robot arm
//!
//! Six scene objects chained Stand -> Base -> Link1 -> Link2 -> Link3 -> Tip.
//! Four joint angles drive the rotations of Base and the three links; the
//! Tip's world position is the probe that pops balloons.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::scene::{ObjectId, Scene, SceneResult};

/// Radians added per key press
pub const JOINT_STEP: f32 = 0.1;

/// Object names of the arm, root first
pub const CHAIN: [&str; 6] = ["Stand", "Base", "Link1", "Link2", "Link3", "Tip"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    Base,
    Low,
    Mid,
    High,
}

impl Joint {
    pub const ALL: [Joint; 4] = [Joint::Base, Joint::Low, Joint::Mid, Joint::High];

    pub fn axis(self) -> Vec3 {
        match self {
            Joint::Base => Vec3::Z,
            Joint::Low | Joint::Mid | Joint::High => Vec3::X,
        }
    }
}

/// Joint angles, each kept in `[0, 2*pi)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JointAngles {
    pub base: f32,
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

impl JointAngles {
    pub fn get(&self, joint: Joint) -> f32 {
        match joint {
            Joint::Base => self.base,
            Joint::Low => self.low,
            Joint::Mid => self.mid,
            Joint::High => self.high,
        }
    }

    /// Add `delta` radians to `joint` and wrap.
    pub fn add(&mut self, joint: Joint, delta: f32) {
        let angle = match joint {
            Joint::Base => &mut self.base,
            Joint::Low => &mut self.low,
            Joint::Mid => &mut self.mid,
            Joint::High => &mut self.high,
        };
        *angle = wrap_angle(*angle + delta);
    }
}

fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Handles to the arm's objects after wiring.
#[derive(Debug, Clone, Copy)]
pub struct RobotRig {
    pub stand: ObjectId,
    pub base: ObjectId,
    pub link1: ObjectId,
    pub link2: ObjectId,
    pub link3: ObjectId,
    pub tip: ObjectId,
}

impl RobotRig {
    /// Find the arm's parts and parent them into a chain. Fails if any part
    /// is missing from the scene.
    pub fn wire(scene: &mut Scene) -> SceneResult<Self> {
        let ids = scene.wire_chain(&CHAIN)?;
        log::info!("Robot arm wired ({} parts)", ids.len());
        Ok(Self {
            stand: ids[0],
            base: ids[1],
            link1: ids[2],
            link2: ids[3],
            link3: ids[4],
            tip: ids[5],
        })
    }

    pub fn joint_object(&self, joint: Joint) -> ObjectId {
        match joint {
            Joint::Base => self.base,
            Joint::Low => self.link1,
            Joint::Mid => self.link2,
            Joint::High => self.link3,
        }
    }

    /// Write the joint angles onto the arm's local rotations.
    pub fn pose(&self, scene: &mut Scene, angles: &JointAngles) -> SceneResult<()> {
        for joint in Joint::ALL {
            scene
                .object_mut(self.joint_object(joint))?
                .transform
                .set_axis_angle(joint.axis(), angles.get(joint));
        }
        Ok(())
    }

    /// World position of the tip.
    pub fn probe(&self, scene: &Scene) -> SceneResult<Vec3> {
        scene.world_position(self.tip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MeshHandle;
    use crate::scene::Transform;

    fn arm_scene() -> Scene {
        let mut scene = Scene::new();
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 0.5),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(0.0, 0.0, 3.0),
            Vec3::new(0.0, 0.0, 4.0),
        ];
        for (name, position) in CHAIN.iter().zip(positions) {
            scene.add_object(*name, Transform::from_position(position), MeshHandle::default());
        }
        scene
    }

    #[test]
    fn angles_stay_wrapped() {
        let mut angles = JointAngles::default();
        for i in 0..500 {
            let delta = if i % 7 < 3 { -JOINT_STEP } else { JOINT_STEP };
            angles.add(Joint::Mid, delta);
            assert!((0.0..TAU).contains(&angles.mid), "{}", angles.mid);
        }
        for _ in 0..1000 {
            angles.add(Joint::Base, -JOINT_STEP);
            assert!((0.0..TAU).contains(&angles.base));
        }
    }

    #[test]
    fn negative_step_from_zero_wraps_high() {
        let mut angles = JointAngles::default();
        angles.add(Joint::Low, -JOINT_STEP);
        assert!((angles.low - (TAU - JOINT_STEP)).abs() < 1e-5);
    }

    #[test]
    fn probe_follows_joints() {
        let mut scene = arm_scene();
        let rig = RobotRig::wire(&mut scene).unwrap();

        let angles = JointAngles::default();
        rig.pose(&mut scene, &angles).unwrap();
        assert!((rig.probe(&scene).unwrap() - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-5);

        // bend the lowest link a quarter turn about +X; everything above
        // link1 swings from +Z towards -Y
        let mut angles = JointAngles::default();
        angles.low = std::f32::consts::FRAC_PI_2;
        rig.pose(&mut scene, &angles).unwrap();
        let probe = rig.probe(&scene).unwrap();
        assert!((probe - Vec3::new(0.0, -3.0, 1.0)).length() < 1e-4, "{probe:?}");

        // base rotation about +Z then turns that arm to +X
        angles.base = std::f32::consts::FRAC_PI_2;
        rig.pose(&mut scene, &angles).unwrap();
        let probe = rig.probe(&scene).unwrap();
        assert!((probe - Vec3::new(3.0, 0.0, 1.0)).length() < 1e-4, "{probe:?}");
    }

    #[test]
    fn missing_part_fails() {
        let mut scene = Scene::new();
        scene.add_object("Stand", Transform::default(), MeshHandle::default());
        assert!(RobotRig::wire(&mut scene).is_err());
    }
}
