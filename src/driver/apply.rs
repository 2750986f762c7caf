use crate::driver::stage::Stage;
use crate::scene::model::EvaluatedScene;

/// Stateless dispatch of an evaluated scene into a [`Stage`] sink.
///
/// Element values, the active frame and stagger items are already plain
/// data by the time they arrive here; driving twice with the same state is
/// harmless.
pub struct Driver;

impl Driver {
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn drive(state: &EvaluatedScene, stage: &mut dyn Stage) {
        for value in &state.values {
            stage.apply(&value.target, value.property, value.value);
        }

        if let Some(frame) = &state.frame {
            stage.show_frame(frame.index, &frame.id);
        }

        for item in &state.items {
            stage.reveal(&item.stagger_id, item.index, &item.target, item.fraction);
            for iv in &item.values {
                stage.apply(&item.target, iv.property, iv.value);
            }
        }
    }
}
