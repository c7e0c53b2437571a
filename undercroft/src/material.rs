//! Binding the materials a generator asks for to the materials a host world provides.
//!
//! Generators never own material definitions. They ask for materials by *role*, using
//! an enum whose variants name the roles (such as "floor brick" or "spawner"), and a
//! [`MaterialProvider`] supplies the host's value for each role. The only thing this
//! crate ever needs to know about a host material is whether it is [air](Material::air).

use core::fmt;
use core::hash::Hash;
use core::ops::Index;

use exhaust::Exhaust;
use hashbrown::HashMap as HbHashMap;

/// Values that may be stored in a [`VoxelBuffer`](crate::VoxelBuffer).
///
/// Implementations are expected to be cheap to clone; typically they are small enums
/// or interned identifiers.
pub trait Material: Clone + PartialEq + fmt::Debug {
    /// The value of empty space. Every cell of a new buffer holds this.
    fn air() -> Self;

    /// Returns whether `self` is [air](Self::air).
    fn is_air(&self) -> bool {
        *self == Self::air()
    }
}

/// A role enum that can name a host material for each of its roles without help.
///
/// Implementing this makes [`MaterialProvider::default`] available for the pair of
/// role enum and host material type. Hosts that pick materials at runtime use
/// [`MaterialProvider::new`] instead.
pub trait DefaultProvision<M> {
    /// Returns the host material that fills the role `self`.
    fn default(self) -> M;
}

/// A complete mapping from every key of the role enum `K` to a material `M`.
///
/// Construct it with [`MaterialProvider::new`] when the host's lookup can fail,
/// [`MaterialProvider::from_fn`] when it cannot, or [`Default`] when `K` knows its
/// own defaults.
#[derive(Clone)]
pub struct MaterialProvider<K, M> {
    /// One entry per role. Every constructor walks [`Exhaust::exhaust`], so no role
    /// can be missing.
    map: HbHashMap<K, M>,
}

impl<K, M> Default for MaterialProvider<K, M>
where
    K: DefaultProvision<M> + Exhaust + Eq + Hash + Clone,
{
    fn default() -> Self {
        Self {
            map: K::exhaust()
                .map(|key| {
                    let material = DefaultProvision::default(key.clone());
                    (key, material)
                })
                .collect(),
        }
    }
}

impl<K, M> MaterialProvider<K, M>
where
    K: Exhaust + fmt::Debug + Eq + Hash + Clone,
{
    /// Constructs a `MaterialProvider` with materials computed by the given function.
    ///
    /// The first key for which `definer` fails aborts construction, and the returned
    /// error names that key.
    pub fn new<F, E>(mut definer: F) -> Result<Self, BindError<K, E>>
    where
        F: FnMut(K) -> Result<M, E>,
        E: core::error::Error + 'static,
    {
        let mut map = HbHashMap::with_capacity(K::exhaust().count());
        for key in K::exhaust() {
            let material = definer(key.clone()).map_err(|source| BindError {
                key: key.clone(),
                source,
            })?;
            map.insert(key, material);
        }
        Ok(Self { map })
    }

    /// Binds every role to whatever `definer` returns for it.
    ///
    /// Use this when every role has a host material, such as when the host maps
    /// roles through a fixed table.
    pub fn from_fn<F>(mut definer: F) -> Self
    where
        F: FnMut(K) -> M,
    {
        Self {
            map: K::exhaust().map(|key| (key.clone(), definer(key))).collect(),
        }
    }

    /// Rebinds every role to a material derived from its current one.
    ///
    /// The result may use a different material type. A host can bind roles to its own
    /// identifiers once, then map them to whatever the room buffers should hold, such
    /// as dimmed variants for a darker room.
    #[must_use]
    pub fn map<M2>(&self, mut function: impl FnMut(&K, &M) -> M2) -> MaterialProvider<K, M2> {
        MaterialProvider {
            map: self
                .map
                .iter()
                .map(|(key, material)| {
                    let material = function(key, material);
                    (key.clone(), material)
                })
                .collect(),
        }
    }

    /// Lists each role with its bound material, in the declaration order of the roles.
    pub fn iter(&self) -> impl Iterator<Item = (K, &M)> {
        K::exhaust().map(|key| {
            let material: &M = &self.map[&key];
            (key, material)
        })
    }

    #[cfg(test)]
    fn consistency_check(&self) {
        use hashbrown::HashSet;
        let expected_keys: HashSet<K> = K::exhaust().collect();
        let actual_keys: HashSet<K> = self.map.keys().cloned().collect();
        assert_eq!(
            expected_keys, actual_keys,
            "MaterialProvider keys are not as expected"
        );
    }
}

impl<K: Eq + Hash, M> Index<K> for MaterialProvider<K, M> {
    type Output = M;

    fn index(&self, index: K) -> &Self::Output {
        &self.map[&index]
    }
}

impl<K: fmt::Debug, M: fmt::Debug> fmt::Debug for MaterialProvider<K, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

/// Error when a [`MaterialProvider`] could not be created because the host failed to
/// supply the material for one of its keys.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("failed to bind material {key:?}")]
pub struct BindError<K: fmt::Debug, E: core::error::Error + 'static> {
    key: K,
    #[source]
    source: E,
}

impl<K: fmt::Debug, E: core::error::Error + 'static> BindError<K, E> {
    /// The key whose material could not be supplied.
    pub fn key(&self) -> &K {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Exhaust)]
    enum Role {
        Floor,
        Wall,
        Light,
    }

    impl DefaultProvision<&'static str> for Role {
        fn default(self) -> &'static str {
            match self {
                Role::Floor => "floor",
                Role::Wall => "wall",
                Role::Light => "light",
            }
        }
    }

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("no such material")]
    struct Missing;

    #[test]
    fn provider_default() {
        let provider = MaterialProvider::<Role, &'static str>::default();
        provider.consistency_check();
        assert_eq!(provider[Role::Wall], "wall");
    }

    #[test]
    fn provider_map_changes_type() {
        let provider = MaterialProvider::<Role, &'static str>::default().map(|_, s| s.len());
        provider.consistency_check();
        assert_eq!(
            provider.iter().map(|(_, &len)| len).collect::<Vec<_>>(),
            vec![5, 4, 5]
        );
    }

    #[test]
    fn provider_new_reports_failing_key() {
        let result = MaterialProvider::<Role, u8>::new(|role| match role {
            Role::Light => Err(Missing),
            _ => Ok(1),
        });
        let error = result.unwrap_err();
        assert_eq!(*error.key(), Role::Light);
        assert_eq!(error.to_string(), "failed to bind material Light");
    }

    #[test]
    fn provider_from_fn() {
        let provider = MaterialProvider::<Role, i32>::from_fn(|role| role as i32 * 10);
        provider.consistency_check();
        assert_eq!(provider[Role::Light], 20);
    }
}
