use std::collections::VecDeque;
use std::io::Read;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::constants::{MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START};
use crate::error::{Chip8Error, Result};
use crate::instruction::Instruction;
use crate::state::{FrameBuffer, Keypad, State};

/// What a single cycle asks of the frontend
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cycle {
    /// The frame buffer was cleared or drawn to
    pub redraw: bool,
    /// The sound timer ran out
    pub sound: bool,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - the random number generator behind CXKK
///
/// Supplies interfaces for:
/// - loading programs
/// - replacing the latched keypad
/// - advancing the CPU (and its timers) one cycle at a time, and reversing it
/// - inspecting its frame buffer and sound request for some frontend
///
/// Nothing here paces itself; the frontend decides how often to call `step`.
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<State>,
    config: Config,
    rng: StdRng,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// A machine whose CXKK sequence is reproducible
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            previous_states: VecDeque::with_capacity(config.history_depth),
            config,
            rng,
        }
    }

    /// Load a program from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize> {
        let mut program = Vec::with_capacity(MAX_PROGRAM_SIZE);
        reader.read_to_end(&mut program)?;
        self.load_program(&program)?;
        Ok(program.len())
    }

    /// Copy a program verbatim into memory at 0x200
    ///
    /// Anything left in the program area by an earlier program is zeroed.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::ProgramTooLarge {
                size: program.len(),
                max_size: MAX_PROGRAM_SIZE,
            });
        }
        let region = self
            .state
            .write(PROGRAM_START as usize, MEMORY_SIZE - PROGRAM_START as usize)?;
        let (loaded, rest) = region.split_at_mut(program.len());
        loaded.copy_from_slice(program);
        rest.iter_mut().for_each(|byte| *byte = 0);
        debug!("loaded {} byte program", program.len());
        Ok(())
    }

    /// Puts everything but memory back to how it started.
    /// The loaded program and sprite sheet survive, so there is no need to reload.
    pub fn reset(&mut self) {
        self.state = self.state.reset();
        self.previous_states.clear();
        debug!("reset");
    }

    /// Advances the CPU by a single cycle
    /// - gets, decodes and executes the next opcode
    /// - ticks the timers
    ///
    /// A failed cycle changes nothing, so calling `step` again fails the same way.
    pub fn step(&mut self) -> Result<Cycle> {
        let result = self.cycle();
        if let Err(err) = &result {
            warn!("cycle at {:#05X} failed: {}", self.state.pc, err);
        }
        result
    }

    fn cycle(&mut self) -> Result<Cycle> {
        let op = self.state.fetch()?;
        let instruction = Instruction::decode(op);
        trace!(
            "{:04X} {:<16} v{:02X?} i{:04X} pc{:04X}",
            op,
            instruction.to_string(),
            self.state.v,
            self.state.i,
            self.state.pc
        );

        let mut next = instruction.execute(&self.state, &self.config, &mut self.rng)?;
        let sound = advance_timers(&mut next);

        self.save_state();
        self.state = next;

        Ok(Cycle {
            redraw: matches!(instruction, Instruction::Clr | Instruction::Draw { .. }),
            sound,
        })
    }

    /// Reverses the CPU by a single cycle if possible
    /// - if there are previous_states, pops the last one and restores it
    pub fn rewind(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                self.state = state;
                debug!("rewound to pc {:#05X}", self.state.pc);
                true
            }
            None => false,
        }
    }

    /// Puts the current state in previous_states
    /// - if there are already `history_depth` saved then the oldest is dropped
    fn save_state(&mut self) {
        if self.config.history_depth == 0 {
            return;
        }
        if self.previous_states.len() == self.config.history_depth {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(self.state);
    }

    /// Replace the latched status of every key; anything non-zero counts as pressed
    ///
    /// # Arguments
    /// * `keys` the pressed status of keys 0..F
    pub fn set_keys(&mut self, keys: &Keypad) {
        for (latched, &key) in self.state.pressed_keys.iter_mut().zip(keys.iter()) {
            *latched = u8::from(key != 0);
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn get_frame(&self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn needs_redraw(&self) -> bool {
        self.state.draw_flag
    }

    /// Call once the frame has been rendered
    pub fn clear_redraw(&mut self) {
        self.state.draw_flag = false;
    }

    pub fn needs_sound(&self) -> bool {
        self.state.sound_flag
    }

    /// Call once the tone has been started
    pub fn clear_sound(&mut self) {
        self.state.sound_flag = false;
    }

    /// Whether the last cycle was an FX0A that found no key down
    pub fn awaiting_key(&self) -> bool {
        self.state.register_needing_key.is_some()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

/// Ticks both timers once; returns whether the sound timer was on its last tick
fn advance_timers(state: &mut State) -> bool {
    if state.delay_timer > 0 {
        state.delay_timer -= 1;
    }

    let sound = state.sound_timer == 1;
    if state.sound_timer > 0 {
        state.sound_timer -= 1;
    }
    if sound {
        state.sound_flag = true;
    }
    sound
}
