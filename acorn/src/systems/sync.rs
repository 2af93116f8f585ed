use hecs::World;

use crate::{
    components::{Info, LocalTransform, Visible},
    contexts::SceneContext,
};

/// Sync system
/// Reconciles every mirrored element with the scene backend, pushing the
/// transform and visibility changes made since the last call.
pub fn sync_system(world: &mut World, scene: &mut SceneContext) {
    for (_, (info, transform, visible)) in world
        .query_mut::<(&Info, &LocalTransform, Option<&Visible>)>()
    {
        scene.apply(&info.name, transform, visible.is_some());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::{RecordingScene, SceneOp};

    #[test]
    pub fn sync_system_test() {
        let backend = RecordingScene::new();
        let ops = backend.ops.clone();
        let mut scene = SceneContext::new(Box::new(backend));
        let mut world = World::new();

        let nut = world.spawn((Info::named("nut_0"), LocalTransform::default()));

        // Hidden at the default transform: nothing to push.
        sync_system(&mut world, &mut scene);
        assert!(ops.borrow().is_empty());

        // Show it and move it.
        world.insert_one(nut, Visible {}).unwrap();
        world
            .get::<&mut LocalTransform>(nut)
            .unwrap()
            .translation
            .x = 0.25;
        sync_system(&mut world, &mut scene);
        {
            let ops = ops.borrow();
            assert_eq!(ops.len(), 2);
            assert!(matches!(&ops[0], SceneOp::SetTransform { element, .. } if element == "nut_0"));
            assert!(matches!(&ops[1], SceneOp::Enable { element } if element == "nut_0"));
        }

        // Steady state pushes nothing.
        sync_system(&mut world, &mut scene);
        assert_eq!(ops.borrow().len(), 2);

        // Hide it again.
        world.remove_one::<Visible>(nut).unwrap();
        sync_system(&mut world, &mut scene);
        assert_eq!(
            ops.borrow().last(),
            Some(&SceneOp::Disable {
                element: "nut_0".into()
            })
        );
    }
}
