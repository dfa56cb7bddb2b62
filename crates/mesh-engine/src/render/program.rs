//! Shader program lifecycle.
//!
//! A program is a vertex + fragment WGSL pair taken through
//! `Uncompiled → VertexCompiled → FragmentCompiled → Linked → Ready`.
//! Each step is checked with naga before anything reaches the device, so a
//! broken shader surfaces as a [`RenderError`] rather than a wgpu panic.
//! Any failed step moves the program to `Failed` for good.

use std::borrow::Cow;

use naga::valid::{Capabilities, ValidationFlags, Validator};

use crate::error::{RenderError, ShaderStage};

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

const MESH_VERTEX_WGSL: &str = include_str!("shaders/mesh_vertex.wgsl");
const MESH_FRAGMENT_WGSL: &str = include_str!("shaders/mesh_fragment.wgsl");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramState {
    Uncompiled,
    VertexCompiled,
    FragmentCompiled,
    Linked,
    /// A render pipeline was built from the program.
    Ready,
    Failed(RenderError),
}

impl ProgramState {
    fn rank(&self) -> u8 {
        match self {
            ProgramState::Uncompiled => 0,
            ProgramState::VertexCompiled => 1,
            ProgramState::FragmentCompiled => 2,
            ProgramState::Linked => 3,
            ProgramState::Ready => 4,
            ProgramState::Failed(_) => u8::MAX,
        }
    }
}

#[derive(Debug)]
pub struct ShaderProgram {
    vertex_src: Cow<'static, str>,
    fragment_src: Cow<'static, str>,
    vertex: Option<naga::Module>,
    fragment: Option<naga::Module>,
    state: ProgramState,
}

impl ShaderProgram {
    pub fn new(
        vertex_src: impl Into<Cow<'static, str>>,
        fragment_src: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            vertex_src: vertex_src.into(),
            fragment_src: fragment_src.into(),
            vertex: None,
            fragment: None,
            state: ProgramState::Uncompiled,
        }
    }

    /// The mesh gradient program.
    pub fn mesh() -> Self {
        Self::new(MESH_VERTEX_WGSL, MESH_FRAGMENT_WGSL)
    }

    #[inline]
    pub fn state(&self) -> &ProgramState {
        &self.state
    }

    #[inline]
    pub fn vertex_source(&self) -> &str {
        &self.vertex_src
    }

    #[inline]
    pub fn fragment_source(&self) -> &str {
        &self.fragment_src
    }

    /// Parses and validates the vertex stage. No-op once past this step.
    pub fn compile_vertex(&mut self) -> Result<(), RenderError> {
        if self.past(ProgramState::Uncompiled)? {
            return Ok(());
        }
        match compile(ShaderStage::Vertex, &self.vertex_src) {
            Ok(module) => {
                self.vertex = Some(module);
                self.advance(ProgramState::VertexCompiled);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Parses and validates the fragment stage, compiling the vertex stage
    /// first if needed.
    pub fn compile_fragment(&mut self) -> Result<(), RenderError> {
        self.compile_vertex()?;
        if self.past(ProgramState::VertexCompiled)? {
            return Ok(());
        }
        match compile(ShaderStage::Fragment, &self.fragment_src) {
            Ok(module) => {
                self.fragment = Some(module);
                self.advance(ProgramState::FragmentCompiled);
                Ok(())
            }
            Err(e) => Err(self.fail(e)),
        }
    }

    /// Checks the two stages fit together.
    ///
    /// Both entry points must exist with the right stage, every `@location`
    /// the fragment stage reads must be written by the vertex stage, and the
    /// fragment stage must write `@location(0)`.
    pub fn link(&mut self) -> Result<(), RenderError> {
        self.compile_fragment()?;
        if self.past(ProgramState::FragmentCompiled)? {
            return Ok(());
        }
        let result = match (&self.vertex, &self.fragment) {
            (Some(vs), Some(fs)) => link_modules(vs, fs),
            _ => Err("stage modules missing".to_string()),
        };
        match result {
            Ok(()) => {
                self.advance(ProgramState::Linked);
                Ok(())
            }
            Err(msg) => Err(self.fail(RenderError::ProgramLinkFailed(msg))),
        }
    }

    /// Runs every remaining step up to `Linked`.
    #[inline]
    pub fn build(&mut self) -> Result<(), RenderError> {
        self.link()
    }

    /// Records that a pipeline now exists for this program.
    pub(crate) fn mark_ready(&mut self) {
        if self.state == ProgramState::Linked {
            self.advance(ProgramState::Ready);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    /// `Ok(true)` when the program is already beyond `step`.
    fn past(&self, step: ProgramState) -> Result<bool, RenderError> {
        if let ProgramState::Failed(e) = &self.state {
            return Err(e.clone());
        }
        Ok(self.state.rank() > step.rank())
    }

    fn advance(&mut self, next: ProgramState) {
        log::debug!("shader program {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, err: RenderError) -> RenderError {
        log::debug!("shader program {:?} -> failed", self.state);
        self.state = ProgramState::Failed(err.clone());
        err
    }
}

fn compile(stage: ShaderStage, src: &str) -> Result<naga::Module, RenderError> {
    let module = naga::front::wgsl::parse_str(src).map_err(|e| RenderError::ShaderCompileFailed {
        stage,
        message: e.emit_to_string(src),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| RenderError::ShaderCompileFailed {
            stage,
            message: e.emit_to_string(src),
        })?;

    Ok(module)
}

fn link_modules(vs: &naga::Module, fs: &naga::Module) -> Result<(), String> {
    let vs_entry = entry_point(vs, VERTEX_ENTRY, naga::ShaderStage::Vertex)
        .ok_or_else(|| format!("no vertex entry point `{VERTEX_ENTRY}`"))?;
    let fs_entry = entry_point(fs, FRAGMENT_ENTRY, naga::ShaderStage::Fragment)
        .ok_or_else(|| format!("no fragment entry point `{FRAGMENT_ENTRY}`"))?;

    let mut produced = Vec::new();
    if let Some(result) = &vs_entry.function.result {
        collect_locations(vs, result.ty, result.binding.as_ref(), &mut produced);
    }

    let mut consumed = Vec::new();
    for arg in &fs_entry.function.arguments {
        collect_locations(fs, arg.ty, arg.binding.as_ref(), &mut consumed);
    }

    let missing: Vec<u32> = consumed.into_iter().filter(|l| !produced.contains(l)).collect();
    if !missing.is_empty() {
        return Err(format!(
            "fragment inputs at @location {missing:?} are not written by the vertex stage"
        ));
    }

    let mut outputs = Vec::new();
    if let Some(result) = &fs_entry.function.result {
        collect_locations(fs, result.ty, result.binding.as_ref(), &mut outputs);
    }
    if !outputs.contains(&0) {
        return Err("fragment stage does not write @location(0)".to_string());
    }

    Ok(())
}

fn entry_point<'m>(
    module: &'m naga::Module,
    name: &str,
    stage: naga::ShaderStage,
) -> Option<&'m naga::EntryPoint> {
    module
        .entry_points
        .iter()
        .find(|ep| ep.name == name && ep.stage == stage)
}

/// User `@location`s of a value, looking through struct members.
fn collect_locations(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<u32>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => out.push(*location),
        Some(_) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect_locations(module, m.ty, m.binding.as_ref(), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = r#"
struct VsOut {
    @builtin(position) clip: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@location(0) pos: vec2<f32>) -> VsOut {
    var out: VsOut;
    out.clip = vec4<f32>(pos, 0.0, 1.0);
    out.uv = pos;
    return out;
}
"#;

    const FS: &str = r#"
@fragment
fn fs_main(@location(0) uv: vec2<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(uv, 0.0, 1.0);
}
"#;

    // ── happy path ────────────────────────────────────────────────────────

    #[test]
    fn steps_advance_in_order() {
        let mut p = ShaderProgram::new(VS, FS);
        assert_eq!(p.state(), &ProgramState::Uncompiled);
        p.compile_vertex().unwrap();
        assert_eq!(p.state(), &ProgramState::VertexCompiled);
        p.compile_fragment().unwrap();
        assert_eq!(p.state(), &ProgramState::FragmentCompiled);
        p.link().unwrap();
        assert_eq!(p.state(), &ProgramState::Linked);
        p.mark_ready();
        assert_eq!(p.state(), &ProgramState::Ready);
    }

    #[test]
    fn build_runs_remaining_steps_and_is_idempotent() {
        let mut p = ShaderProgram::new(VS, FS);
        p.build().unwrap();
        assert_eq!(p.state(), &ProgramState::Linked);
        p.build().unwrap();
        assert_eq!(p.state(), &ProgramState::Linked);
    }

    #[test]
    fn mesh_program_links() {
        let mut p = ShaderProgram::mesh();
        p.build().unwrap();
        assert_eq!(p.state(), &ProgramState::Linked);
    }

    #[test]
    fn handle_shader_validates() {
        let src = include_str!("shaders/handles.wgsl");
        let mut p = ShaderProgram::new(src, src);
        p.build().unwrap();
    }

    #[test]
    fn mark_ready_requires_linked() {
        let mut p = ShaderProgram::new(VS, FS);
        p.mark_ready();
        assert_eq!(p.state(), &ProgramState::Uncompiled);
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn broken_vertex_fails_compile() {
        let mut p = ShaderProgram::new("fn vs_main( {", FS);
        let err = p.build().unwrap_err();
        assert!(matches!(err, RenderError::ShaderCompileFailed { stage: ShaderStage::Vertex, .. }));
        assert!(matches!(p.state(), ProgramState::Failed(_)));
    }

    #[test]
    fn invalid_fragment_fails_compile_after_vertex() {
        // Parses, but returns the wrong type.
        let fs = "@fragment fn fs_main() -> @location(0) vec4<f32> { return 1.0; }";
        let mut p = ShaderProgram::new(VS, fs);
        let err = p.build().unwrap_err();
        match err {
            RenderError::ShaderCompileFailed { stage, message } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(!message.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unmatched_location_fails_link() {
        let fs = r#"
@fragment
fn fs_main(@location(3) tint: vec4<f32>) -> @location(0) vec4<f32> {
    return tint;
}
"#;
        let mut p = ShaderProgram::new(VS, fs);
        p.compile_fragment().unwrap();
        let err = p.link().unwrap_err();
        assert!(matches!(err, RenderError::ProgramLinkFailed(ref m) if m.contains("[3]")), "{err}");
    }

    #[test]
    fn wrong_entry_point_fails_link() {
        let fs = "@fragment fn main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }";
        let mut p = ShaderProgram::new(VS, fs);
        assert!(matches!(p.build(), Err(RenderError::ProgramLinkFailed(_))));
    }

    #[test]
    fn failure_is_sticky() {
        let mut p = ShaderProgram::new("not wgsl", FS);
        let first = p.build().unwrap_err();
        assert_eq!(p.compile_vertex().unwrap_err(), first);
        assert_eq!(p.link().unwrap_err(), first);
    }
}
