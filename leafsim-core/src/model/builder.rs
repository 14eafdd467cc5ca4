use crate::model::ModelList;
use crate::process::{EnergyModel, InterceptionModel, PhotosynthesisModel, StomatalConductanceModel};
use std::sync::Arc;

/// Assemble a [`ModelList`].
///
/// ```rust,ignore
/// let models = ModelList::builder()
///     .with_energy_balance(Monteith::default())
///     .with_photosynthesis(Fvcb::default())
///     .with_stomatal_conductance(Medlyn::new(0.03, 12.0))
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelListBuilder {
    models: ModelList,
}

impl ModelListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_light_interception<M: InterceptionModel + 'static>(&mut self, model: M) -> &mut Self {
        self.models.light_interception = Some(Arc::new(model));
        self
    }

    pub fn with_energy_balance<M: EnergyModel + 'static>(&mut self, model: M) -> &mut Self {
        self.models.energy_balance = Some(Arc::new(model));
        self
    }

    pub fn with_photosynthesis<M: PhotosynthesisModel + 'static>(&mut self, model: M) -> &mut Self {
        self.models.photosynthesis = Some(Arc::new(model));
        self
    }

    pub fn with_stomatal_conductance<M: StomatalConductanceModel + 'static>(
        &mut self,
        model: M,
    ) -> &mut Self {
        self.models.stomatal_conductance = Some(Arc::new(model));
        self
    }

    pub fn build(&self) -> ModelList {
        self.models.clone()
    }
}
