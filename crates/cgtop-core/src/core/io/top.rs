use crate::core::models::topology::{TermCounts, Topology};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Number of entries in every block of a topology file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionCounts {
    pub particles: usize,
    pub bonds: usize,
    pub angles: usize,
    pub dihedrals: usize,
    pub native: usize,
}

impl SectionCounts {
    pub fn term_counts(&self) -> TermCounts {
        TermCounts {
            particles: self.particles,
            bonds: self.bonds,
            angles: self.angles,
            dihedrals: self.dihedrals,
        }
    }

    fn slot(&mut self, section: &str) -> Option<&mut usize> {
        match section {
            "particles" => Some(&mut self.particles),
            "bonds" => Some(&mut self.bonds),
            "angles" => Some(&mut self.angles),
            "dihedrals" => Some(&mut self.dihedrals),
            "native" => Some(&mut self.native),
            _ => None,
        }
    }
}

/// The section-tagged topology text format.
///
/// Each block is a `[ name ]` header carrying the entry count, a `#` column
/// comment, the right-justified rows and a blank separator line.
pub struct TopFile;

impl TopFile {
    pub fn write(topology: &Topology, writer: &mut impl Write) -> io::Result<()> {
        writeln!(writer, "[ particles ]{:>8}", topology.particles.len())?;
        writeln!(
            writer,
            "# {:>9}{:>9}{:>10}{:>10}{:>17}{:>13}",
            "index", "resid", "resname", "atom", "mass", "charge"
        )?;
        for p in &topology.particles {
            writeln!(
                writer,
                "{:>11}{:>9}{:>10}{:>10}{:>17.4}{:>13.4}",
                p.index, p.residue_index, p.residue_name, p.name, p.mass, p.charge
            )?;
        }
        writeln!(writer)?;

        writeln!(writer, "[ bonds ]{:>8}", topology.bonds.len())?;
        writeln!(writer, "# {:>6}{:>9}{:>17}{:>9}", "pi", "pj", "r0", "K_b")?;
        for b in &topology.bonds {
            writeln!(writer, "{:>8}{:>9}{:>17.4}{:>9.2}", b.i, b.j, b.r0, b.k)?;
        }
        writeln!(writer)?;

        writeln!(writer, "[ angles ]{:>8}", topology.angles.len())?;
        writeln!(
            writer,
            "# {:>6}{:>9}{:>9}{:>13}{:>9}",
            "pi", "pj", "pk", "theta_0", "K_a"
        )?;
        for a in &topology.angles {
            writeln!(
                writer,
                "{:>8}{:>9}{:>9}{:>13.4}{:>9.2}",
                a.i, a.j, a.k, a.theta0, a.k_angle
            )?;
        }
        writeln!(writer)?;

        writeln!(writer, "[ dihedrals ]{:>8}", topology.dihedrals.len())?;
        writeln!(
            writer,
            "# {:>6}{:>9}{:>9}{:>9}{:>13}{:>9}{:>9}",
            "pi", "pj", "pk", "pl", "phi_0", "K_d_1", "K_d_3"
        )?;
        for d in &topology.dihedrals {
            writeln!(
                writer,
                "{:>8}{:>9}{:>9}{:>9}{:>13.4}{:>9.2}{:>9.2}",
                d.i, d.j, d.k, d.l, d.phi0, d.k1, d.k3
            )?;
        }
        writeln!(writer)?;

        writeln!(writer, "[ native ]{:>8}", topology.native.len())?;
        writeln!(writer, "# {:>6}{:>9}{:>17}{:>13}", "pi", "pj", "sigma", "eps")?;
        for c in &topology.native {
            writeln!(
                writer,
                "{:>8}{:>9}{:>17.4}{:>13.4}",
                c.i, c.j, c.sigma, c.epsilon
            )?;
        }
        writeln!(writer)?;
        Ok(())
    }

    /// Reads back the block headers of a topology file and checks every declared
    /// count against the number of rows that follow it.
    pub fn read_section_counts(reader: &mut impl BufRead) -> Result<SectionCounts, TopError> {
        let mut counts = SectionCounts::default();
        // (section name, declared count, header line, rows seen)
        let mut current: Option<(String, usize, usize, usize)> = None;

        let check = |section: &Option<(String, usize, usize, usize)>| -> Result<(), TopError> {
            match section {
                Some((name, declared, line, rows)) if declared != rows => Err(TopError::Parse {
                    line: *line,
                    message: format!(
                        "section '{}' declares {} entries but has {}",
                        name, declared, rows
                    ),
                }),
                _ => Ok(()),
            }
        };

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            if let Some(rest) = trimmed.strip_prefix('[') {
                check(&current)?;
                let (name, count) = rest.split_once(']').ok_or_else(|| TopError::Parse {
                    line: line_num,
                    message: "unterminated section header".into(),
                })?;
                let name = name.trim().to_string();
                let count: usize = count.trim().parse().map_err(|_| TopError::Parse {
                    line: line_num,
                    message: format!("invalid entry count '{}'", count.trim()),
                })?;
                let slot = counts.slot(&name).ok_or_else(|| TopError::Parse {
                    line: line_num,
                    message: format!("unknown section '{}'", name),
                })?;
                *slot = count;
                current = Some((name, count, line_num, 0));
                continue;
            }

            match current.as_mut() {
                Some((_, _, _, rows)) => *rows += 1,
                None => {
                    return Err(TopError::Parse {
                        line: line_num,
                        message: "entry outside of any section".into(),
                    });
                }
            }
        }
        check(&current)?;
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::topology::{AngleTerm, BondTerm, NativeContact, Particle};
    use nalgebra::Point3;
    use std::io::Cursor;

    fn sample() -> Topology {
        let particle = |index: usize, name: &str| Particle {
            index,
            chain_id: 'A',
            residue_index: index as i32,
            residue_name: name.into(),
            name: "CA",
            mass: 71.09,
            charge: 0.0,
            position: Point3::new(index as f64 * 3.8, 0.0, 0.0),
        };
        Topology {
            particles: vec![particle(1, "ALA"), particle(2, "GLY"), particle(3, "SER")],
            bonds: vec![
                BondTerm { i: 1, j: 2, r0: 3.8, k: 100.0 },
                BondTerm { i: 2, j: 3, r0: 3.8, k: 100.0 },
            ],
            angles: vec![AngleTerm { i: 1, j: 2, k: 3, theta0: 180.0, k_angle: 20.0 }],
            dihedrals: Vec::new(),
            native: vec![NativeContact { i: 1, j: 3, sigma: 7.6, epsilon: 1.0 }],
        }
    }

    fn render(topology: &Topology) -> String {
        let mut out = Vec::new();
        TopFile::write(topology, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn write_emits_headers_comments_and_rows() {
        let text = render(&sample());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "[ particles ]       3");
        assert_eq!(
            lines[1],
            "#     index    resid   resname      atom             mass       charge"
        );
        assert_eq!(
            lines[2],
            "          1        1       ALA        CA          71.0900       0.0000"
        );
        assert_eq!(lines[5], "");
        assert_eq!(lines[6], "[ bonds ]       2");
        assert_eq!(lines[8], "       1        2           3.8000   100.00");
        assert!(text.contains("[ dihedrals ]       0\n"));
        assert!(text.contains("[ native ]       1\n"));
    }

    #[test]
    fn read_section_counts_recovers_written_counts() {
        let topology = sample();
        let counts = TopFile::read_section_counts(&mut Cursor::new(render(&topology))).unwrap();
        assert_eq!(counts.term_counts(), topology.counts());
        assert_eq!(counts.native, 1);
    }

    #[test]
    fn read_section_counts_rejects_mismatched_rows() {
        let text = "[ bonds ]       2\n# pi pj r0 K_b\n       1        2   3.8   100.0\n";
        let err = TopFile::read_section_counts(&mut Cursor::new(text)).unwrap_err();
        assert!(matches!(err, TopError::Parse { line: 1, .. }));
    }

    #[test]
    fn read_section_counts_rejects_unknown_sections() {
        let text = "[ exclusions ]       0\n";
        let err = TopFile::read_section_counts(&mut Cursor::new(text)).unwrap_err();
        assert!(err.to_string().contains("unknown section 'exclusions'"));
    }

    #[test]
    fn read_section_counts_rejects_rows_before_any_header() {
        let text = "       1        2\n";
        assert!(matches!(
            TopFile::read_section_counts(&mut Cursor::new(text)),
            Err(TopError::Parse { line: 1, .. })
        ));
    }
}
