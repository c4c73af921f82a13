use crate::error::{Error, Result};
use crate::model::{Build, Category, Component};
use crate::store::CatalogStore;

/// Either side of a build combination.
#[derive(Debug, Clone, Copy)]
pub enum Addend<'a> {
    Component(&'a Component),
    Build(&'a Build),
}

impl Addend<'_> {
    fn to_build(self) -> Build {
        match self {
            Addend::Component(component) => Build::from_component(component),
            Addend::Build(build) => build.clone(),
        }
    }
}

impl<'a> From<&'a Component> for Addend<'a> {
    fn from(component: &'a Component) -> Self {
        Addend::Component(component)
    }
}

impl<'a> From<&'a Build> for Addend<'a> {
    fn from(build: &'a Build) -> Self {
        Addend::Build(build)
    }
}

/// Sum two addends into one build.
///
/// Stats add elementwise. Each category slot takes whichever side has an id;
/// two different ids in the same slot are rejected.
pub fn combine(a: Addend<'_>, b: Addend<'_>) -> Result<Build> {
    let left = a.to_build();
    let right = b.to_build();

    let mut ids = [None; 4];
    for category in Category::ALL {
        ids[category.index()] = match (left.id(category), right.id(category)) {
            (Some(x), Some(y)) if x != y => {
                return Err(Error::InvalidOperand(format!(
                    "build already holds {} {}, cannot add {} {}",
                    category, x, category, y
                )));
            }
            (Some(x), _) => Some(x),
            (None, other) => other,
        };
    }

    Ok(Build::new(ids, left.stats + right.stats))
}

/// Left fold of [`combine`]. `None` for an empty slice.
pub fn combine_all(addends: &[Addend<'_>]) -> Result<Option<Build>> {
    let Some((first, rest)) = addends.split_first() else {
        return Ok(None);
    };
    let mut acc = first.to_build();
    for addend in rest {
        acc = combine(Addend::Build(&acc), *addend)?;
    }
    Ok(Some(acc))
}

/// Full cross product of the four categories, driver-major.
pub fn assemble(
    drivers: &[Component],
    vehicles: &[Component],
    tyres: &[Component],
    gliders: &[Component],
) -> Result<Vec<Build>> {
    let mut builds =
        Vec::with_capacity(drivers.len() * vehicles.len() * tyres.len() * gliders.len());
    for driver in drivers {
        for vehicle in vehicles {
            let dv = combine(driver.into(), vehicle.into())?;
            for tyre in tyres {
                let dvt = combine((&dv).into(), tyre.into())?;
                for glider in gliders {
                    builds.push(combine((&dvt).into(), glider.into())?);
                }
            }
        }
    }
    Ok(builds)
}

/// Rebuild the build table from the current component tables.
pub async fn materialize<S: CatalogStore>(store: &mut S) -> Result<usize> {
    let drivers = store.query_components(Category::Driver).await?;
    let vehicles = store.query_components(Category::Vehicle).await?;
    let tyres = store.query_components(Category::Tyre).await?;
    let gliders = store.query_components(Category::Glider).await?;

    let builds = assemble(&drivers, &vehicles, &tyres, &gliders)?;
    store.replace_builds(&builds).await?;

    tracing::info!(
        drivers = drivers.len(),
        vehicles = vehicles.len(),
        tyres = tyres.len(),
        gliders = gliders.len(),
        "materialized {} builds",
        builds.len()
    );
    Ok(builds.len())
}
