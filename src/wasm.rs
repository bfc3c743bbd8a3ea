use crate::map::Map;
use crate::mesh::MeshData;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

#[wasm_bindgen(js_name = Map)]
pub struct MapWASM {
    inner: Map,
}

#[wasm_bindgen(js_class = Map)]
impl MapWASM {
    /// Parses a `.map` source. Structural errors surface as JS exceptions.
    pub fn parse(source: &str) -> Result<MapWASM, JsError> {
        Ok(MapWASM {
            inner: Map::parse(source)?,
        })
    }

    pub fn reduce(&mut self) {
        self.inner.reduce();
    }

    #[wasm_bindgen(getter)]
    pub fn count_entities(&self) -> usize {
        self.inner.entities.len()
    }

    #[wasm_bindgen(getter)]
    pub fn count_brushes(&self) -> usize {
        self.inner.count_brushes()
    }

    #[wasm_bindgen(getter)]
    pub fn count_surfaces(&self) -> usize {
        self.inner.count_surfaces()
    }

    pub fn classname(&self, entity: usize) -> Option<String> {
        self.inner
            .entities
            .get(entity)
            .map(|entity| entity.classname().to_string())
    }

    pub fn origin(&self, entity: usize) -> Option<Vec<f64>> {
        self.inner
            .entities
            .get(entity)
            .and_then(|entity| entity.origin())
            .map(|origin| origin.to_vec())
    }

    /// Boundary loops of one brush as an Array of Float64Array, one flat [x, y, z, ...]
    /// buffer per surface.
    // Workaround for the fact that wasm-bindgen does not support nested vectors directly
    pub fn loops(&self, entity: usize, brush: usize) -> js_sys::Array {
        let result = js_sys::Array::new();

        let Some(brush) = self
            .inner
            .entities
            .get(entity)
            .and_then(|entity| entity.brushes.get(brush))
        else {
            return result;
        };

        for surface in &brush.surfaces {
            let flat: Vec<f64> = surface
                .winding
                .points()
                .iter()
                .flat_map(|point| point.iter().copied())
                .collect();
            result.push(&js_sys::Float64Array::from(flat.as_slice()).into());
        }
        result
    }

    pub fn build_mesh(&self) -> MeshWASM {
        MeshWASM {
            inner: MeshData::from_map(&self.inner),
        }
    }
}

#[wasm_bindgen(js_name = MeshData)]
pub struct MeshWASM {
    inner: MeshData,
}

#[wasm_bindgen(js_class = MeshData)]
impl MeshWASM {
    /// Flat array of vertices [x, y, z, x, y, z, ...].
    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> Vec<f64> {
        self.inner.positions.clone()
    }

    /// Triangle list indices into `positions`.
    #[wasm_bindgen(getter)]
    pub fn indices(&self) -> Vec<u32> {
        self.inner.indices.clone()
    }

    /// Line list index pairs for orthographic wireframe views.
    #[wasm_bindgen(getter)]
    pub fn edges(&self) -> Vec<u32> {
        self.inner.edges.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn count_vertices(&self) -> usize {
        self.inner.count_vertices()
    }

    #[wasm_bindgen(getter)]
    pub fn count_triangles(&self) -> usize {
        self.inner.count_triangles()
    }
}
