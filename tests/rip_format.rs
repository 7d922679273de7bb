use byteorder::{LittleEndian, WriteBytesExt};
use rip_reader::{
    import_batch, GeometryBuffers, ImportOptions, LayoutMode, ManualLayout, MeshConstructor,
    RipError, RipFile, DEFAULT_TEXTURE, RIP_FILE_VERSION, RIP_SIGNATURE,
};
use std::fs;
use std::path::{Path, PathBuf};

/// One declared attribute in a synthesized fixture.
struct FixtureAttribute {
    semantic: &'static str,
    semantic_index: u32,
    byte_offset: u32,
    /// On-disk type codes (0 float, 1 uint, 2 int).
    type_codes: Vec<u32>,
}

impl FixtureAttribute {
    fn floats(semantic: &'static str, semantic_index: u32, byte_offset: u32, count: usize) -> Self {
        Self {
            semantic,
            semantic_index,
            byte_offset,
            type_codes: vec![0; count],
        }
    }
}

/// Builds RIP v4 byte images in memory, field by field, so tests never rely
/// on checked-in binaries.
struct RipFixture {
    signature: u32,
    version: u32,
    attributes: Vec<FixtureAttribute>,
    textures: Vec<&'static str>,
    shaders: Vec<&'static str>,
    faces: Vec<[u32; 3]>,
    /// Raw record words, vertex-major; floats via `to_bits`.
    vertex_words: Vec<u32>,
    vertex_count: u32,
}

impl RipFixture {
    fn new() -> Self {
        Self {
            signature: RIP_SIGNATURE,
            version: RIP_FILE_VERSION,
            attributes: Vec::new(),
            textures: Vec::new(),
            shaders: Vec::new(),
            faces: Vec::new(),
            vertex_words: Vec::new(),
            vertex_count: 0,
        }
    }

    fn words_per_record(&self) -> u32 {
        self.attributes
            .iter()
            .map(|a| a.type_codes.len() as u32)
            .sum()
    }

    fn push_vertex(&mut self, values: &[f32]) {
        assert_eq!(
            values.len() as u32,
            self.words_per_record(),
            "fixture vertex does not match declared layout"
        );
        self.vertex_words.extend(values.iter().map(|v| v.to_bits()));
        self.vertex_count += 1;
    }

    fn push_raw_vertex(&mut self, words: &[u32]) {
        assert_eq!(words.len() as u32, self.words_per_record());
        self.vertex_words.extend_from_slice(words);
        self.vertex_count += 1;
    }

    fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.write_u32::<LittleEndian>(self.signature).unwrap();
        out.write_u32::<LittleEndian>(self.version).unwrap();
        out.write_u32::<LittleEndian>(self.faces.len() as u32).unwrap();
        out.write_u32::<LittleEndian>(self.vertex_count).unwrap();
        out.write_u32::<LittleEndian>(self.words_per_record() * 4).unwrap();
        out.write_u32::<LittleEndian>(self.textures.len() as u32).unwrap();
        out.write_u32::<LittleEndian>(self.shaders.len() as u32).unwrap();
        out.write_u32::<LittleEndian>(self.attributes.len() as u32).unwrap();

        for attr in &self.attributes {
            out.extend_from_slice(attr.semantic.as_bytes());
            out.push(0);
            out.write_u32::<LittleEndian>(attr.semantic_index).unwrap();
            out.write_u32::<LittleEndian>(attr.byte_offset).unwrap();
            out.write_u32::<LittleEndian>(attr.type_codes.len() as u32 * 4).unwrap();
            out.write_u32::<LittleEndian>(attr.type_codes.len() as u32).unwrap();
            for &code in &attr.type_codes {
                out.write_u32::<LittleEndian>(code).unwrap();
            }
        }

        for name in self.textures.iter().chain(&self.shaders) {
            out.extend_from_slice(name.as_bytes());
            out.push(0);
        }

        for face in &self.faces {
            for &index in face {
                out.write_u32::<LittleEndian>(index).unwrap();
            }
        }

        for &word in &self.vertex_words {
            out.write_u32::<LittleEndian>(word).unwrap();
        }

        out
    }
}

/// A small complete mesh: POSITION(3f) + NORMAL(3f) + TEXCOORD(2f), 4
/// vertices of 8 floats each, 2 triangles {0,1,2} and {0,2,3}.
fn reference_fixture() -> RipFixture {
    let mut fixture = RipFixture::new();
    fixture.attributes = vec![
        FixtureAttribute::floats("POSITION", 0, 0, 3),
        FixtureAttribute::floats("NORMAL", 0, 12, 3),
        FixtureAttribute::floats("TEXCOORD", 0, 24, 2),
    ];
    fixture.textures = vec!["diffuse.dds", "lightmap.dds"];
    fixture.shaders = vec!["vs_main.hlsl"];
    fixture.faces = vec![[0, 1, 2], [0, 2, 3]];
    for i in 0..4u32 {
        let f = i as f32;
        fixture.push_vertex(&[f, f + 0.5, -f, 0.0, 1.0, 0.0, 0.25 * f, 0.125 * f]);
    }
    fixture
}

#[test]
fn reference_mesh_emits_complete_geometry() {
    let data = reference_fixture().build();
    let file = RipFile::from_bytes(&data, &ImportOptions::default()).expect("import reference mesh");

    assert_eq!(file.header.face_count, 2);
    assert_eq!(file.geometry.positions.len(), 4, "position count must match header");
    assert_eq!(file.geometry.normals.len(), 4);
    assert_eq!(file.geometry.u.len(), 4);
    assert_eq!(file.geometry.v.len(), 4);
    assert_eq!(
        file.geometry.indices,
        vec![0, 1, 2, 0, 2, 3],
        "face index buffer must be the flat triple sequence"
    );

    for i in 0..4 {
        let f = i as f32;
        assert_eq!(
            file.geometry.positions[i],
            [f, f + 0.5, -f, 1.0],
            "position {} with homogeneous w defaulting to 1.0",
            i
        );
        assert_eq!(file.geometry.normals[i], [0.0, 1.0, 0.0]);
        assert_eq!(file.geometry.u[i], 0.25 * f);
        assert_eq!(
            file.geometry.v[i],
            1.0 - 0.125 * f,
            "V must be stored flipped as 1 - raw"
        );
    }

    assert_eq!(file.texture_files, vec!["diffuse.dds", "lightmap.dds"]);
    assert_eq!(file.shader_files, vec!["vs_main.hlsl"]);
    assert_eq!(file.selected_texture(&ImportOptions::default()), "diffuse.dds");
}

#[test]
fn texture_selection_clamps_and_falls_back() {
    let data = reference_fixture().build();
    let mut options = ImportOptions {
        texture_index: 1,
        ..Default::default()
    };
    let file = RipFile::from_bytes(&data, &options).expect("import");
    assert_eq!(file.selected_texture(&options), "lightmap.dds");

    options.texture_index = 99;
    assert_eq!(
        file.selected_texture(&options),
        "diffuse.dds",
        "out-of-range texture index clamps to the first entry"
    );

    let mut bare = reference_fixture();
    bare.textures.clear();
    let bare_file = RipFile::from_bytes(&bare.build(), &ImportOptions::default()).expect("import");
    assert_eq!(bare_file.selected_texture(&ImportOptions::default()), DEFAULT_TEXTURE);
}

#[test]
fn duplicate_position_first_occurrence_wins() {
    let mut fixture = RipFixture::new();
    fixture.attributes = vec![
        FixtureAttribute::floats("POSITION", 0, 0, 3),
        FixtureAttribute::floats("POSITION", 1, 12, 3),
        FixtureAttribute::floats("TEXCOORD", 0, 24, 2),
    ];
    fixture.faces = vec![[0, 0, 0]];
    fixture.push_vertex(&[1.0, 2.0, 3.0, 9.0, 9.0, 9.0, 0.5, 0.5]);

    let file = RipFile::from_bytes(&fixture.build(), &ImportOptions::default()).expect("import");
    assert_eq!(file.layout.position_slots(), &[0, 1, 2]);
    assert_eq!(
        file.geometry.positions[0],
        [1.0, 2.0, 3.0, 1.0],
        "second POSITION declaration must not overwrite the first"
    );
}

#[test]
fn bad_signature_rejected_before_attribute_parsing() {
    let mut fixture = reference_fixture();
    fixture.signature = 0x1234_5678;
    let mut data = fixture.build();
    // Corrupt everything after the header; a signature failure must surface
    // before the attribute table is ever touched.
    for byte in &mut data[32..] {
        *byte = 0xFF;
    }

    let err = RipFile::from_bytes(&data, &ImportOptions::default()).unwrap_err();
    assert!(
        matches!(err, RipError::BadSignature { actual: 0x1234_5678, .. }),
        "expected BadSignature, got {:?}",
        err
    );
}

#[test]
fn unsupported_version_rejected() {
    let mut fixture = reference_fixture();
    fixture.version = 7;
    let err = RipFile::from_bytes(&fixture.build(), &ImportOptions::default()).unwrap_err();
    assert!(
        matches!(err, RipError::UnsupportedVersion { expected: RIP_FILE_VERSION, actual: 7 }),
        "expected UnsupportedVersion, got {:?}",
        err
    );
}

#[test]
fn manual_mode_ignores_declared_semantics() {
    // Two files with identical record bytes but deliberately mislabeled
    // semantics: auto recognition would disagree, manual overrides must not.
    let mut labeled = RipFixture::new();
    labeled.attributes = vec![
        FixtureAttribute::floats("POSITION", 0, 0, 3),
        FixtureAttribute::floats("TEXCOORD", 0, 12, 2),
    ];
    let mut mislabeled = RipFixture::new();
    mislabeled.attributes = vec![
        FixtureAttribute::floats("BLENDWEIGHT", 0, 0, 3),
        FixtureAttribute::floats("COLOR", 0, 12, 2),
    ];
    for fixture in [&mut labeled, &mut mislabeled] {
        fixture.faces = vec![[0, 1, 0]];
        fixture.push_vertex(&[1.0, 2.0, 3.0, 0.25, 0.5]);
        fixture.push_vertex(&[4.0, 5.0, 6.0, 0.75, 0.25]);
    }

    let options = ImportOptions {
        layout: LayoutMode::Manual(ManualLayout {
            position: vec![0, 1, 2],
            normal: vec![],
            texcoord: vec![3, 4],
        }),
        ..Default::default()
    };

    let a = RipFile::from_bytes(&labeled.build(), &options).expect("labeled import");
    let b = RipFile::from_bytes(&mislabeled.build(), &options).expect("mislabeled import");
    assert_eq!(a.geometry.positions, b.geometry.positions);
    assert_eq!(a.geometry.u, b.geometry.u);
    assert_eq!(a.geometry.v, b.geometry.v);
    assert_eq!(a.geometry.positions[1], [4.0, 5.0, 6.0, 1.0]);
    assert_eq!(a.geometry.v[0], 0.5, "manual UV slots still get the V flip");
}

#[test]
fn missing_position_requires_import_anything() {
    let mut fixture = RipFixture::new();
    fixture.faces = vec![[0, 1, 2], [0, 2, 3]];
    for _ in 0..4 {
        fixture.push_vertex(&[]);
    }

    let err = RipFile::from_bytes(&fixture.build(), &ImportOptions::default()).unwrap_err();
    assert!(
        matches!(err, RipError::IncompleteGeometry(_)),
        "a file with no resolvable position is not a 3-D object: {:?}",
        err
    );

    let options = ImportOptions {
        import_anything: true,
        ..Default::default()
    };
    let file = RipFile::from_bytes(&fixture.build(), &options).expect("forced import");
    assert_eq!(file.geometry.positions.len(), 4);
    assert!(
        file.geometry.positions.iter().all(|p| *p == [0.0, 0.0, 0.0, 1.0]),
        "unresolved positions emit zero-filled components"
    );
    assert_eq!(file.geometry.indices.len(), 6);
}

#[test]
fn texcoord_declarations_accumulate_as_uv_sets() {
    let mut fixture = RipFixture::new();
    fixture.attributes = vec![
        FixtureAttribute::floats("POSITION", 0, 0, 3),
        FixtureAttribute::floats("TEXCOORD", 0, 12, 2),
        FixtureAttribute::floats("TEXCOORD", 1, 20, 2),
    ];
    fixture.faces = vec![[0, 0, 0]];
    fixture.push_vertex(&[1.0, 1.0, 1.0, 0.25, 0.5, 0.75, 0.125]);

    let data = fixture.build();
    let first = RipFile::from_bytes(&data, &ImportOptions::default()).expect("uv set 0");
    assert_eq!(first.layout.uv_set_count(), 2);
    assert_eq!(first.geometry.u[0], 0.25);
    assert_eq!(first.geometry.v[0], 0.5);

    let second = RipFile::from_bytes(
        &data,
        &ImportOptions {
            uv_set: 1,
            ..Default::default()
        },
    )
    .expect("uv set 1");
    assert_eq!(second.geometry.u[0], 0.75);
    assert_eq!(second.geometry.v[0], 1.0 - 0.125);

    let out_of_range = RipFile::from_bytes(
        &data,
        &ImportOptions {
            uv_set: 5,
            ..Default::default()
        },
    )
    .expect("uv set out of range still imports");
    assert_eq!(out_of_range.geometry.u[0], 0.0);
    assert_eq!(
        out_of_range.geometry.v[0], 1.0,
        "missing texcoord defaults to raw 0.0 before the flip"
    );
}

#[test]
fn single_component_uv_set_is_not_a_full_pair() {
    let mut fixture = RipFixture::new();
    fixture.attributes = vec![
        FixtureAttribute::floats("POSITION", 0, 0, 3),
        FixtureAttribute::floats("TEXCOORD", 0, 12, 1),
    ];
    fixture.faces = vec![[0, 0, 0]];
    fixture.push_vertex(&[1.0, 2.0, 3.0, 0.25]);

    let err = RipFile::from_bytes(&fixture.build(), &ImportOptions::default()).unwrap_err();
    assert!(
        matches!(err, RipError::IncompleteGeometry(_)),
        "one texcoord component is not a renderable UV pair: {:?}",
        err
    );

    let options = ImportOptions {
        import_anything: true,
        ..Default::default()
    };
    let file = RipFile::from_bytes(&fixture.build(), &options).expect("forced import");
    assert_eq!(file.geometry.u[0], 0.25, "the lone component still feeds U");
    assert_eq!(
        file.geometry.v[0], 1.0,
        "the missing V component reads raw 0.0 and is stored flipped"
    );
}

#[test]
fn uv_set_request_without_any_resolved_sets_defaults_to_zero() {
    let mut fixture = RipFixture::new();
    fixture.attributes = vec![FixtureAttribute::floats("POSITION", 0, 0, 3)];
    fixture.faces = vec![[0, 0, 0]];
    fixture.push_vertex(&[1.0, 2.0, 3.0]);

    let options = ImportOptions {
        uv_set: 3,
        import_anything: true,
        ..Default::default()
    };
    let file = RipFile::from_bytes(&fixture.build(), &options).expect("forced import");
    assert_eq!(file.geometry.u[0], 0.0);
    assert_eq!(file.geometry.v[0], 1.0);
}

#[test]
fn integer_fields_widen_to_float() {
    let mut fixture = RipFixture::new();
    fixture.attributes = vec![FixtureAttribute {
        semantic: "POSITION",
        semantic_index: 0,
        byte_offset: 0,
        // int, uint, and an unrecognized code that must default to uint.
        type_codes: vec![2, 1, 77],
    }];
    fixture.faces = vec![[0, 0, 0]];
    fixture.push_raw_vertex(&[u32::MAX, 7, 3]);

    let options = ImportOptions {
        import_anything: true,
        ..Default::default()
    };
    let file = RipFile::from_bytes(&fixture.build(), &options).expect("import");
    assert_eq!(
        file.geometry.positions[0],
        [-1.0, 7.0, 3.0, 1.0],
        "int32 reads signed, uint32 and unknown codes read unsigned"
    );
}

#[test]
fn misaligned_attribute_offset_is_malformed() {
    let mut fixture = RipFixture::new();
    fixture.attributes = vec![FixtureAttribute::floats("POSITION", 0, 6, 3)];
    let err = RipFile::from_bytes(&fixture.build(), &ImportOptions::default()).unwrap_err();
    assert!(
        matches!(err, RipError::MalformedAttribute(_)),
        "expected MalformedAttribute, got {:?}",
        err
    );
}

#[test]
fn truncated_vertex_block_fails() {
    let mut data = reference_fixture().build();
    data.truncate(data.len() - 10);
    let err = RipFile::from_bytes(&data, &ImportOptions::default()).unwrap_err();
    assert!(
        matches!(err, RipError::TruncatedInput { .. }),
        "expected TruncatedInput, got {:?}",
        err
    );
}

#[test]
fn truncated_header_fails() {
    let data = reference_fixture().build();
    let err = RipFile::from_bytes(&data[..20], &ImportOptions::default()).unwrap_err();
    assert!(matches!(err, RipError::TruncatedInput { .. }));
}

struct CountingConstructor {
    built: Vec<(usize, String)>,
}

impl MeshConstructor for CountingConstructor {
    type Handle = usize;

    fn build_mesh(
        &mut self,
        geometry: &GeometryBuffers,
        _source_dir: &Path,
        texture: &str,
    ) -> rip_reader::Result<usize> {
        self.built.push((geometry.positions.len(), texture.to_string()));
        Ok(self.built.len())
    }
}

#[test]
fn batch_import_continues_past_bad_files() {
    let dir = std::env::temp_dir().join("rip-reader-batch-test");
    fs::create_dir_all(&dir).expect("create temp dir");

    let good = dir.join("good.rip");
    fs::write(&good, reference_fixture().build()).expect("write good fixture");

    let bad = dir.join("bad.rip");
    let mut broken = reference_fixture();
    broken.signature = 0;
    fs::write(&bad, broken.build()).expect("write bad fixture");

    let good_again = dir.join("good_again.rip");
    fs::write(&good_again, reference_fixture().build()).expect("write second good fixture");

    let mut constructor = CountingConstructor { built: Vec::new() };
    let paths: Vec<PathBuf> = vec![good, bad.clone(), good_again];
    let outcome = import_batch(&paths, &ImportOptions::default(), &mut constructor);

    assert_eq!(outcome.meshes, vec![1, 2], "both good files must build");
    assert_eq!(outcome.failures.len(), 1, "the bad file is recorded, not fatal");
    assert_eq!(outcome.failures[0].0, bad);
    assert!(matches!(outcome.failures[0].1, RipError::BadSignature { .. }));
    assert!(
        constructor.built.iter().all(|(count, texture)| *count == 4 && texture == "diffuse.dds"),
        "each built mesh saw the full geometry and selected texture"
    );
}
