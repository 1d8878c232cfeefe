//! Structural digests for module trees using BLAKE3

use crate::tree::Module;
use blake3::Hasher;

pub type Digest = [u8; 32];

/// Compute the digest of a module subtree
///
/// Digest = hash("module" || name_len || name || version || dependencies ||
/// extra || children_count || child digests)
///
/// Children are hashed in stored order; `Module::add_submodule` keeps them
/// sorted by name, so equal trees produce equal digests.
pub fn compute_module_digest(module: &Module) -> Digest {
    let mut hasher = Hasher::new();

    hasher.update(b"module");
    update_str(&mut hasher, &module.name);

    match &module.version {
        Some(version) => {
            hasher.update(&[1]);
            update_str(&mut hasher, version);
        }
        None => {
            hasher.update(&[0]);
        }
    }

    hasher.update(&(module.dependencies.len() as u64).to_be_bytes());
    for dep in &module.dependencies {
        update_str(&mut hasher, &dep.target);
        update_str(&mut hasher, dep.scope.as_deref().unwrap_or(""));
    }

    // serde_json::Map is a BTreeMap here, so keys serialize in sorted order
    let extra = serde_json::Value::Object(module.extra.clone()).to_string();
    update_str(&mut hasher, &extra);

    hasher.update(&(module.submodules.len() as u64).to_be_bytes());
    for child in &module.submodules {
        hasher.update(&compute_module_digest(child));
    }

    *hasher.finalize().as_bytes()
}

/// Hex form of [`compute_module_digest`], as reported after a pass.
pub fn module_digest_hex(module: &Module) -> String {
    hex::encode(compute_module_digest(module))
}

fn update_str(hasher: &mut Hasher, value: &str) {
    hasher.update(&(value.len() as u64).to_be_bytes());
    hasher.update(value.as_bytes());
}
