#[non_exhaustive]
pub struct ReplicateModelVersion;

impl ReplicateModelVersion {
    pub const FLUX_DEV_LORA: &'static str =
        "a22c463f11808638ad5e2ebd582e07a469031f48dd567366fb4c6fdab91d614d";
}
